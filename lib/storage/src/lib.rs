//! # ordercast Storage
//!
//! Reference data store: the customers, locations and vendors tables read
//! from CSV once per process and shared read-only afterwards.
//!
//! Every file's header is checked against its required columns before any
//! row is parsed, and location numbers are normalized to integers at load
//! time, so feature assembly never sees a malformed table.

pub mod cache;
pub mod loader;
pub mod tables;

pub use cache::ReferenceCache;
pub use loader::{DataPaths, DEFAULT_CUSTOMERS_FILE, DEFAULT_LOCATIONS_FILE, DEFAULT_VENDORS_FILE};
pub use tables::{ReferenceData, TableStats};
