//! # ordercast
//!
//! Predicts whether a customer at one of their saved delivery locations is
//! likely to order from a given vendor.
//!
//! ordercast joins three reference tables (customers, locations, vendors),
//! derives the customer-vendor distance, encodes the categorical columns and
//! scores the resulting row with a gradient-boosted tree ensemble.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! ordercast --data-dir ./data vendors
//! ordercast --data-dir ./data predict --customer C1 --location 1 --vendor V1
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use ordercast::prelude::*;
//!
//! let app = App::start(AppConfig::default()).unwrap();
//! match app.predict(&Query::new("C1", LocationNumber::new(1), "V1")) {
//!     Ok(prediction) => println!("{prediction}"),
//!     Err(e) if e.is_recoverable() => println!("{}", e.user_message()),
//!     Err(e) => panic!("{e}"),
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`ordercast-core`](https://docs.rs/ordercast-core) - Identifiers, table rows, geometry and errors
//! - [`ordercast-storage`](https://docs.rs/ordercast-storage) - CSV loading and the reference cache
//! - [`ordercast-features`](https://docs.rs/ordercast-features) - Joins, imputation and categorical encoding
//! - [`ordercast-scoring`](https://docs.rs/ordercast-scoring) - Model artifact and tree ensemble scoring

pub mod app;
pub mod config;
pub mod pipeline;

pub use app::App;
pub use config::AppConfig;
pub use pipeline::{Prediction, Predictor};

// Re-export core types
pub use ordercast_core::{
    Customer, CustomerId, Error, Location, LocationNumber, Query, Result, Table, Vendor, VendorId,
    CANNOT_PREDICT_MESSAGE,
};

pub use ordercast_features::{FeatureAssembler, FeatureRow, FEATURE_COLUMNS};
pub use ordercast_scoring::{GbdtScorer, Label, ModelArtifact, Scorer};
pub use ordercast_storage::{DataPaths, ReferenceCache, ReferenceData};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        App, AppConfig, CustomerId, Error, Label, LocationNumber, Prediction, Predictor, Query, Result,
        VendorId,
    };
}
