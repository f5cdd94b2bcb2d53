pub mod a001_lcp_nap_location;
pub mod a002_application_visit;
pub mod a003_job_order_assign;
pub mod a004_service_order;
pub mod a005_discount;
pub mod a006_rebate;
pub mod common;
