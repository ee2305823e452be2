use thiserror::Error;

use crate::entity::Table;

pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to a user when a prediction cannot be produced for the
/// selected combination.
pub const CANNOT_PREDICT_MESSAGE: &str = "Missing or invalid data for this combination.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("No {table} record for key {key}")]
    NotFound { table: Table, key: String },

    #[error("Invalid feature row: column '{column}' is undefined")]
    InvalidFeatureRow { column: String },

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Schema error in {table} table: missing required column '{column}'")]
    Schema { table: Table, column: String },

    #[error("Invalid record in {table} table at line {line}: {reason}")]
    InvalidRecord { table: Table, line: u64, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Errors that reject a single prediction without affecting the process.
    ///
    /// Join misses and undefined feature values are recovered into one
    /// "cannot predict" outcome; everything else happens at load time and is fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::InvalidFeatureRow { .. })
    }

    /// Text suitable for the presentation layer.
    pub fn user_message(&self) -> String {
        if self.is_recoverable() {
            CANNOT_PREDICT_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    pub fn not_found(table: Table, key: impl std::fmt::Display) -> Self {
        Error::NotFound {
            table,
            key: key.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_outcomes() {
        assert!(Error::not_found(Table::Customers, "C1").is_recoverable());
        assert!(Error::InvalidFeatureRow { column: "distance".into() }.is_recoverable());
        assert!(!Error::ModelUnavailable("missing".into()).is_recoverable());
        assert!(!Error::Schema { table: Table::Vendors, column: "id".into() }.is_recoverable());
    }

    #[test]
    fn test_user_message_is_unified() {
        let a = Error::not_found(Table::Locations, "C1/7").user_message();
        let b = Error::InvalidFeatureRow { column: "cust_lat".into() }.user_message();
        assert_eq!(a, CANNOT_PREDICT_MESSAGE);
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_names_table() {
        let e = Error::not_found(Table::Vendors, "V9");
        assert_eq!(e.to_string(), "No vendors record for key V9");
    }
}
