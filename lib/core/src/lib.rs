//! # ordercast Core
//!
//! Core types shared by every ordercast crate.
//!
//! - [`Customer`], [`Location`], [`Vendor`] - reference table rows
//! - [`Query`] - the (customer, location, vendor) triple of one prediction
//! - [`LocationNumber`] - integer location numbers normalized from raw cells
//! - [`Coordinates`] - latitude/longitude with planar distance
//! - [`Error`] - the error taxonomy surfaced to callers
//!
//! ## Example
//!
//! ```rust
//! use ordercast_core::{Coordinates, LocationNumber, Query};
//!
//! let n: LocationNumber = "3.0".parse().unwrap();
//! assert_eq!(n, LocationNumber::new(3));
//!
//! let query = Query::new("C1", n, "V1");
//! assert_eq!(query.location_number.get(), 3);
//!
//! let d = Coordinates::new(24.0, 54.0).planar_distance(&Coordinates::new(24.0, 54.0));
//! assert_eq!(d, 0.0);
//! ```

pub mod entity;
pub mod error;
pub mod geo;
pub mod ids;

pub use entity::{Customer, Location, Query, Table, Vendor};
pub use error::{Error, Result, CANNOT_PREDICT_MESSAGE};
pub use geo::{planar_distance, Coordinates};
pub use ids::{CustomerId, LocationNumber, ParseLocationNumberError, VendorId};
