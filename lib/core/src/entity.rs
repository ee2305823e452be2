use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::Coordinates;
use crate::ids::{CustomerId, LocationNumber, VendorId};

/// The three reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Customers,
    Locations,
    Vendors,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Customers => "customers",
            Table::Locations => "locations",
            Table::Vendors => "vendors",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub gender: Option<String>,
    pub age: Option<f64>,
    pub language: Option<String>,
    pub account_age_days: Option<f64>,
}

/// A delivery location owned by exactly one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub customer_id: CustomerId,
    pub number: LocationNumber,
    pub location_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Location {
    /// Both coordinates, if the row carries them
    #[inline]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }
}

/// A vendor row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub tag: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Vendor {
    #[inline]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }
}

/// One prediction request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub customer_id: CustomerId,
    pub location_number: LocationNumber,
    pub vendor_id: VendorId,
}

impl Query {
    #[must_use]
    pub fn new(
        customer_id: impl Into<CustomerId>,
        location_number: impl Into<LocationNumber>,
        vendor_id: impl Into<VendorId>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            location_number: location_number.into(),
            vendor_id: vendor_id.into(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "customer={} location={} vendor={}",
            self.customer_id, self.location_number, self.vendor_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_coordinates_require_both_parts() {
        let mut loc = Location {
            customer_id: "C1".into(),
            number: LocationNumber::new(1),
            location_type: Some("Home".into()),
            latitude: Some(24.0),
            longitude: Some(54.0),
        };
        assert_eq!(loc.coordinates(), Some(Coordinates::new(24.0, 54.0)));

        loc.longitude = None;
        assert_eq!(loc.coordinates(), None);
    }

    #[test]
    fn test_query_display() {
        let q = Query::new("C1", LocationNumber::new(2), "V1");
        assert_eq!(q.to_string(), "customer=C1 location=2 vendor=V1");
    }
}
