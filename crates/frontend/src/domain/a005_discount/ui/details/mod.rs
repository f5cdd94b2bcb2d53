mod model;
mod view_model;

pub use view_model::DiscountVm;
