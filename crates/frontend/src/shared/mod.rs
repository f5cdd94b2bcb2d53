pub mod api_utils;
pub mod fetch_guard;
pub mod form_context;
pub mod form_validation;
pub mod geo_cascade;
pub mod port_cascade;
pub mod reference_data;
pub mod select_utils;
