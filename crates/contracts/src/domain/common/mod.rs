//! Reference data shared by several forms

pub mod geo;
pub mod lcp_nap;

// Re-exports
pub use geo::{GeoAddress, GeoEntity, GeoKind};
pub use lcp_nap::{LcpNapNode, PortSlot};
