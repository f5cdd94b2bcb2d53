//! Service order edit form with the LCP-NAP / port selectors
//!
//! - model.rs: API functions
//! - view_model.rs: form state, port cascade and save command

mod model;
mod view_model;

pub use view_model::ServiceOrderVm;
