//! # ordercast Features
//!
//! Turns a (customer, location, vendor) query into the feature row the
//! order-likelihood model consumes.
//!
//! ## Example
//!
//! ```rust
//! use ordercast_core::{LocationNumber, Query};
//! use ordercast_features::FeatureAssembler;
//! use ordercast_storage::ReferenceData;
//! use std::sync::Arc;
//!
//! let customers = "customer_id,gender,age,language,account_age_days\nC1,Male,31,EN,120\n";
//! let locations = "customer_id,location_number,location_type,latitude,longitude\nC1,1,Home,24.0,54.0\n";
//! let vendors = "id,vendor_tag_name,latitude,longitude\nV1,Pizza,24.0,54.0\n";
//! let data = ReferenceData::from_readers(customers.as_bytes(), locations.as_bytes(), vendors.as_bytes()).unwrap();
//!
//! let assembler = FeatureAssembler::new(Arc::new(data));
//! let row = assembler.assemble_query(&Query::new("C1", LocationNumber::new(1), "V1")).unwrap();
//! assert_eq!(row.distance, Some(0.0));
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Query     │────>│   Joins     │────>│  Distance   │
//! │ (c, l, v)   │     │ (3 tables)  │     │  (planar)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Encoding   │<────│ Imputation  │
//!                     │ (4 columns) │     │             │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod assembler;
pub mod encoding;
pub mod impute;
pub mod row;

pub use assembler::{AssemblerBuilder, FeatureAssembler};
pub use encoding::{CategoricalColumn, CategoryEncoder, CategoryEncoders, EncoderError, EncodingPolicy, UNKNOWN_CATEGORY};
pub use impute::{DistanceFill, MISSING_NUMERIC_SENTINEL};
pub use row::{CategoryLabels, FeatureRow, FEATURE_COLUMNS};
