//! Job order assignment
//!
//! - model.rs: API functions
//! - view_model.rs: form state, geo cascade, billing day handling

mod model;
mod view_model;

pub use view_model::JobOrderAssignVm;
