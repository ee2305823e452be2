//! Feature Assembler
//!
//! Joins a query against the reference tables and turns the result into a
//! [`FeatureRow`]:
//!
//! 1. customer lookup by id
//! 2. location lookup by (customer id, location number)
//! 3. vendor lookup by id
//! 4. planar customer-vendor distance
//! 5. numeric imputation and distance fill
//! 6. categorical encoding
//!
//! A miss in any of the three joins is [`Error::NotFound`]; nothing partial
//! is returned.

use ordercast_core::{planar_distance, CustomerId, Error, LocationNumber, Query, Result, Table, VendorId};
use ordercast_storage::ReferenceData;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::encoding::{CategoricalColumn, EncodingPolicy, UNKNOWN_CATEGORY};
use crate::impute::{impute_numeric, DistanceFill};
use crate::row::{CategoryLabels, FeatureRow};

/// Builds feature rows from shared, immutable reference data
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    data: Arc<ReferenceData>,
    encoding: EncodingPolicy,
    distance_fill: DistanceFill,
}

impl FeatureAssembler {
    /// Assembler with the legacy policies: per-row encoding and row-mean distance fill
    pub fn new(data: Arc<ReferenceData>) -> Self {
        AssemblerBuilder::new(data).build()
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn encoding(&self) -> &EncodingPolicy {
        &self.encoding
    }

    pub fn distance_fill(&self) -> DistanceFill {
        self.distance_fill
    }

    pub fn assemble_query(&self, query: &Query) -> Result<FeatureRow> {
        self.assemble(&query.customer_id, query.location_number, &query.vendor_id)
    }

    pub fn assemble(
        &self,
        customer_id: &CustomerId,
        location_number: LocationNumber,
        vendor_id: &VendorId,
    ) -> Result<FeatureRow> {
        let customer = self
            .data
            .customer(customer_id)
            .ok_or_else(|| Error::not_found(Table::Customers, customer_id))?;

        let location = self
            .data
            .location(customer_id, location_number)
            .ok_or_else(|| Error::not_found(Table::Locations, format!("{customer_id}/{location_number}")))?;

        let vendor = self
            .data
            .vendor(vendor_id)
            .ok_or_else(|| Error::not_found(Table::Vendors, vendor_id))?;

        let raw_distance = planar_distance(location.coordinates(), vendor.coordinates());
        let distance = self.distance_fill.fill(raw_distance);
        if raw_distance.is_none() {
            debug!(
                customer = %customer_id,
                vendor = %vendor_id,
                filled = distance.is_some(),
                "distance undefined, coordinates missing"
            );
        }

        let labels = CategoryLabels {
            gender: label(customer.gender.as_deref()),
            language: label(customer.language.as_deref()),
            location_type: label(location.location_type.as_deref()),
            vendor_tag: label(vendor.tag.as_deref()),
        };

        Ok(FeatureRow {
            query: Query {
                customer_id: customer_id.clone(),
                location_number,
                vendor_id: vendor_id.clone(),
            },
            gender: self.encode(CategoricalColumn::Gender, &labels.gender),
            age: impute_numeric(customer.age),
            language: self.encode(CategoricalColumn::Language, &labels.language),
            account_age_days: impute_numeric(customer.account_age_days),
            location_type: self.encode(CategoricalColumn::LocationType, &labels.location_type),
            cust_lat: location.latitude,
            cust_long: location.longitude,
            vendor_tag: self.encode(CategoricalColumn::VendorTag, &labels.vendor_tag),
            vendor_lat: vendor.latitude,
            vendor_long: vendor.longitude,
            distance,
            labels,
        })
    }

    #[inline]
    fn encode(&self, column: CategoricalColumn, value: &str) -> u32 {
        self.encoding.encode(column, Some(value))
    }
}

fn label(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN_CATEGORY.to_string(),
    }
}

/// Builder for [`FeatureAssembler`]
#[derive(Debug, Clone)]
pub struct AssemblerBuilder {
    data: Arc<ReferenceData>,
    encoding: EncodingPolicy,
    distance_fill: DistanceFill,
}

impl AssemblerBuilder {
    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self {
            data,
            encoding: EncodingPolicy::PerRow,
            distance_fill: DistanceFill::RowMean,
        }
    }

    pub fn encoding(mut self, encoding: EncodingPolicy) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn distance_fill(mut self, fill: DistanceFill) -> Self {
        self.distance_fill = fill;
        self
    }

    pub fn build(self) -> FeatureAssembler {
        if !self.encoding.is_trained() {
            warn!("per-row categorical encoding in use, codes do not match training-time codes");
        }
        FeatureAssembler {
            data: self.data,
            encoding: self.encoding,
            distance_fill: self.distance_fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{CategoryEncoder, CategoryEncoders};

    const CUSTOMERS: &str = "customer_id,gender,age,language,account_age_days\n\
                             C1,Male,31,EN,120\n\
                             C2,,,,\n";
    const LOCATIONS: &str = "customer_id,location_number,location_type,latitude,longitude\n\
                             C1,1.0,Work,24.0,54.0\n\
                             C1,2,Home,27.0,58.0\n\
                             C2,0,,,\n";
    const VENDORS: &str = "id,vendor_tag_name,latitude,longitude\n\
                           V1,Pizza,24.0,54.0\n\
                           V2,,24.0,54.0\n\
                           V3,Sushi,,\n";

    fn data() -> Arc<ReferenceData> {
        Arc::new(ReferenceData::from_readers(CUSTOMERS.as_bytes(), LOCATIONS.as_bytes(), VENDORS.as_bytes()).unwrap())
    }

    fn trained() -> EncodingPolicy {
        EncodingPolicy::Trained(CategoryEncoders {
            gender: CategoryEncoder::fit(["Female", "Male", "unknown"]),
            language: CategoryEncoder::fit(["AR", "EN"]),
            location_type: CategoryEncoder::fit(["Home", "Other", "Work"]),
            vendor_tag: CategoryEncoder::fit(["Burgers", "Pizza"]),
        })
    }

    #[test]
    fn test_valid_triple_is_complete() {
        let assembler = FeatureAssembler::new(data());
        let row = assembler
            .assemble(&"C1".into(), LocationNumber::new(1), &"V1".into())
            .unwrap();
        assert!(row.is_complete());
        assert_eq!(row.distance, Some(0.0));
        assert_eq!(row.age, 31.0);
        assert_eq!(row.query.location_number, LocationNumber::new(1));
    }

    #[test]
    fn test_distance_computed() {
        let assembler = FeatureAssembler::new(data());
        let row = assembler
            .assemble(&"C1".into(), LocationNumber::new(2), &"V1".into())
            .unwrap();
        assert!((row.distance.unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_each_join_miss_is_not_found() {
        let assembler = FeatureAssembler::new(data());
        let cases = [
            (Query::new("C9", LocationNumber::new(1), "V1"), Table::Customers),
            (Query::new("C1", LocationNumber::new(7), "V1"), Table::Locations),
            (Query::new("C2", LocationNumber::new(1), "V1"), Table::Locations),
            (Query::new("C1", LocationNumber::new(1), "V9"), Table::Vendors),
        ];
        for (query, expected) in cases {
            match assembler.assemble_query(&query) {
                Err(Error::NotFound { table, .. }) => assert_eq!(table, expected, "{query}"),
                other => panic!("{query}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_numerics_use_sentinel() {
        let assembler = FeatureAssembler::new(data());
        let row = assembler
            .assemble(&"C2".into(), LocationNumber::new(0), &"V1".into())
            .unwrap();
        assert_eq!(row.age, -1.0);
        assert_eq!(row.account_age_days, -1.0);
        assert_eq!(row.labels.gender, "unknown");
        assert_eq!(row.labels.location_type, "unknown");
    }

    #[test]
    fn test_missing_coordinates_with_row_mean_stay_undefined() {
        let assembler = FeatureAssembler::new(data());
        let row = assembler
            .assemble(&"C2".into(), LocationNumber::new(0), &"V1".into())
            .unwrap();
        assert_eq!(row.distance, None);
        assert!(matches!(row.feature_vector(), Err(Error::InvalidFeatureRow { .. })));
    }

    #[test]
    fn test_historical_fill_still_rejects_missing_coordinates() {
        let assembler = AssemblerBuilder::new(data())
            .distance_fill(DistanceFill::Historical(0.4))
            .build();
        let row = assembler
            .assemble(&"C2".into(), LocationNumber::new(0), &"V1".into())
            .unwrap();
        assert_eq!(row.distance, Some(0.4));
        match row.feature_vector() {
            Err(Error::InvalidFeatureRow { column }) => assert_eq!(column, "cust_lat"),
            other => panic!("unexpected {other:?}"),
        }

        let row = assembler
            .assemble(&"C1".into(), LocationNumber::new(1), &"V3".into())
            .unwrap();
        assert_eq!(row.distance, Some(0.4));
        assert!(!row.is_complete());
        match row.feature_vector() {
            Err(Error::InvalidFeatureRow { column }) => assert_eq!(column, "vendor_lat"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_trained_encoding_uses_fixed_codes() {
        let assembler = AssemblerBuilder::new(data()).encoding(trained()).build();
        let row = assembler
            .assemble(&"C1".into(), LocationNumber::new(1), &"V1".into())
            .unwrap();
        assert_eq!(row.gender, 1);
        assert_eq!(row.language, 1);
        assert_eq!(row.location_type, 2);
        assert_eq!(row.vendor_tag, 1);

        let row = assembler
            .assemble(&"C2".into(), LocationNumber::new(0), &"V2".into())
            .unwrap();
        // "unknown" is a trained gender class, the other columns use the extra bucket
        assert_eq!(row.gender, 2);
        assert_eq!(row.language, 2);
        assert_eq!(row.location_type, 3);
        assert_eq!(row.vendor_tag, 2);
    }

    #[test]
    fn test_per_row_encoding_collapses_to_zero() {
        let assembler = FeatureAssembler::new(data());
        let row = assembler
            .assemble(&"C1".into(), LocationNumber::new(1), &"V1".into())
            .unwrap();
        assert_eq!((row.gender, row.language, row.location_type, row.vendor_tag), (0, 0, 0, 0));
    }
}
