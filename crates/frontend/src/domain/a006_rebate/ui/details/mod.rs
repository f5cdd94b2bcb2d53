//! Rebate form
//!
//! The rebate target depends on its type: an LCP-NAP node, a barangay picked
//! through the geo cascade, or a single account.

mod model;
mod view_model;

pub use view_model::RebateVm;
