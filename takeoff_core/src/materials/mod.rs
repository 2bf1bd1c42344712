//! # Materials
//!
//! Lumber designations and the ordering catalog that rounds computed
//! quantities to what a yard actually sells.

pub mod catalog;
pub mod lumber_sizes;

pub use catalog::{LumberCatalog, SHEET_AREA_SQ_FT};
pub use lumber_sizes::LumberSize;
