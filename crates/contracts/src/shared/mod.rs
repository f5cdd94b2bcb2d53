pub mod cascade;
pub mod error;
pub mod fetch_guard;
pub mod form_context;
pub mod hierarchy;
pub mod validation;
