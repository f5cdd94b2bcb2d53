//! LCP-NAP Location Details Module
//!
//! MVVM without a view:
//! - model.rs: API functions (fetch, save)
//! - view_model.rs: form state, geo cascade and save command

mod model;
mod view_model;

pub use view_model::LcpNapLocationVm;
