//! Application visit editor: model.rs for the API calls, view_model.rs for the form

mod model;
mod view_model;

pub use view_model::ApplicationVisitVm;
