use ordercast_core::{Error, Query, Result};
use serde::{Deserialize, Serialize};

/// Model input columns, in order. Identifier columns are not part of it.
pub const FEATURE_COLUMNS: [&str; 11] = [
    "gender",
    "age",
    "language",
    "account_age_days",
    "location_type",
    "cust_lat",
    "cust_long",
    "vendor_tag",
    "vendor_lat",
    "vendor_long",
    "distance",
];

/// Category text behind each encoded column, after "unknown" substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabels {
    pub gender: String,
    pub language: String,
    pub location_type: String,
    pub vendor_tag: String,
}

/// One joined, imputed and encoded record.
///
/// Coordinates and distance stay optional: a row may still carry undefined
/// values after imputation, and [`feature_vector`](Self::feature_vector)
/// refuses to produce model input from such a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    #[serde(flatten)]
    pub query: Query,
    pub gender: u32,
    pub age: f64,
    pub language: u32,
    pub account_age_days: f64,
    pub location_type: u32,
    pub cust_lat: Option<f64>,
    pub cust_long: Option<f64>,
    pub vendor_tag: u32,
    pub vendor_lat: Option<f64>,
    pub vendor_long: Option<f64>,
    pub distance: Option<f64>,
    pub labels: CategoryLabels,
}

impl FeatureRow {
    /// Feature values paired with their column names, in model order
    pub fn columns(&self) -> [(&'static str, Option<f64>); 11] {
        let values = [
            Some(self.gender as f64),
            Some(self.age),
            Some(self.language as f64),
            Some(self.account_age_days),
            Some(self.location_type as f64),
            self.cust_lat,
            self.cust_long,
            Some(self.vendor_tag as f64),
            self.vendor_lat,
            self.vendor_long,
            self.distance,
        ];
        let mut out = [("", None); 11];
        for (slot, (name, value)) in out.iter_mut().zip(FEATURE_COLUMNS.iter().zip(values)) {
            *slot = (*name, value.filter(|v| !v.is_nan()));
        }
        out
    }

    /// First column without a defined value, if any
    pub fn first_undefined(&self) -> Option<&'static str> {
        self.columns()
            .iter()
            .find(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
    }

    pub fn is_complete(&self) -> bool {
        self.first_undefined().is_none()
    }

    /// Model input with identifiers dropped.
    ///
    /// Fails with [`Error::InvalidFeatureRow`] naming the first undefined column.
    pub fn feature_vector(&self) -> Result<Vec<f64>> {
        self.columns()
            .iter()
            .map(|(name, value)| {
                value.ok_or_else(|| Error::InvalidFeatureRow {
                    column: (*name).to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ordercast_core::LocationNumber;

    pub(crate) fn complete_row() -> FeatureRow {
        FeatureRow {
            query: Query::new("C1", LocationNumber::new(1), "V1"),
            gender: 1,
            age: 31.0,
            language: 0,
            account_age_days: 120.0,
            location_type: 2,
            cust_lat: Some(24.0),
            cust_long: Some(54.0),
            vendor_tag: 3,
            vendor_lat: Some(24.0),
            vendor_long: Some(54.0),
            distance: Some(0.0),
            labels: CategoryLabels {
                gender: "Male".into(),
                language: "EN".into(),
                location_type: "Work".into(),
                vendor_tag: "Pizza".into(),
            },
        }
    }

    #[test]
    fn test_vector_order_matches_columns() {
        let v = complete_row().feature_vector().unwrap();
        assert_eq!(v, vec![1.0, 31.0, 0.0, 120.0, 2.0, 24.0, 54.0, 3.0, 24.0, 54.0, 0.0]);
        assert_eq!(v.len(), FEATURE_COLUMNS.len());
    }

    #[test]
    fn test_undefined_column_is_reported() {
        let mut row = complete_row();
        row.vendor_long = None;
        row.distance = None;
        assert_eq!(row.first_undefined(), Some("vendor_long"));
        match row.feature_vector() {
            Err(Error::InvalidFeatureRow { column }) => assert_eq!(column, "vendor_long"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_nan_counts_as_undefined() {
        let mut row = complete_row();
        row.age = f64::NAN;
        assert!(!row.is_complete());
        assert_eq!(row.first_undefined(), Some("age"));
    }

    #[test]
    fn test_serializes_identifiers_flat() {
        let json = serde_json::to_value(complete_row()).unwrap();
        assert_eq!(json["customer_id"], "C1");
        assert_eq!(json["location_number"], 1);
        assert_eq!(json["vendor_id"], "V1");
        assert_eq!(json["labels"]["vendor_tag"], "Pizza");
    }
}
