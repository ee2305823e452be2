// CSV readers for the three reference files
use ordercast_core::{Customer, CustomerId, Error, Location, LocationNumber, Result, Table, Vendor, VendorId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const CUSTOMER_COLUMNS: &[&str] = &["customer_id", "gender", "age", "language", "account_age_days"];
pub const LOCATION_COLUMNS: &[&str] = &["customer_id", "location_number", "location_type", "latitude", "longitude"];
pub const VENDOR_COLUMNS: &[&str] = &["id", "vendor_tag_name", "latitude", "longitude"];

pub const DEFAULT_CUSTOMERS_FILE: &str = "train_customers_clean.csv";
pub const DEFAULT_LOCATIONS_FILE: &str = "train_locations_clean.csv";
pub const DEFAULT_VENDORS_FILE: &str = "vendors_clean.csv";

/// Locations of the three reference files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    pub customers: PathBuf,
    pub locations: PathBuf,
    pub vendors: PathBuf,
}

impl DataPaths {
    /// Default file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            customers: dir.join(DEFAULT_CUSTOMERS_FILE),
            locations: dir.join(DEFAULT_LOCATIONS_FILE),
            vendors: dir.join(DEFAULT_VENDORS_FILE),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CustomerRecord {
    customer_id: String,
    gender: Option<String>,
    age: Option<f64>,
    language: Option<String>,
    account_age_days: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    customer_id: String,
    location_number: String,
    location_type: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct VendorRecord {
    id: String,
    vendor_tag_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// A parsed row together with the line it came from
pub struct Row<T> {
    pub line: u64,
    pub value: T,
}

pub fn read_customers<R: Read>(reader: R) -> Result<Vec<Row<Customer>>> {
    read_table::<_, CustomerRecord>(reader, Table::Customers, CUSTOMER_COLUMNS)?
        .into_iter()
        .map(|row| {
            let r = row.value;
            Ok(Row {
                line: row.line,
                value: Customer {
                    id: CustomerId::new(required_key(Table::Customers, row.line, r.customer_id)?),
                    gender: r.gender,
                    age: defined(r.age),
                    language: r.language,
                    account_age_days: defined(r.account_age_days),
                },
            })
        })
        .collect()
}

pub fn read_locations<R: Read>(reader: R) -> Result<Vec<Row<Location>>> {
    read_table::<_, LocationRecord>(reader, Table::Locations, LOCATION_COLUMNS)?
        .into_iter()
        .map(|row| {
            let r = row.value;
            let number = LocationNumber::normalize(&r.location_number).map_err(|e| Error::InvalidRecord {
                table: Table::Locations,
                line: row.line,
                reason: e.to_string(),
            })?;
            Ok(Row {
                line: row.line,
                value: Location {
                    customer_id: CustomerId::new(required_key(Table::Locations, row.line, r.customer_id)?),
                    number,
                    location_type: r.location_type,
                    latitude: defined(r.latitude),
                    longitude: defined(r.longitude),
                },
            })
        })
        .collect()
}

pub fn read_vendors<R: Read>(reader: R) -> Result<Vec<Row<Vendor>>> {
    read_table::<_, VendorRecord>(reader, Table::Vendors, VENDOR_COLUMNS)?
        .into_iter()
        .map(|row| {
            let r = row.value;
            Ok(Row {
                line: row.line,
                value: Vendor {
                    id: VendorId::new(required_key(Table::Vendors, row.line, r.id)?),
                    tag: r.vendor_tag_name,
                    latitude: defined(r.latitude),
                    longitude: defined(r.longitude),
                },
            })
        })
        .collect()
}

pub fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Check the header against `required` before touching any row, then
/// deserialize every record.
fn read_table<R: Read, T: DeserializeOwned>(reader: R, table: Table, required: &[&str]) -> Result<Vec<Row<T>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(|e| csv_error(table, e))?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::Schema {
                table,
                column: (*column).to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(table, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let value = record
            .deserialize::<T>(Some(&headers))
            .map_err(|e| Error::InvalidRecord {
                table,
                line,
                reason: e.to_string(),
            })?;
        rows.push(Row { line, value });
    }
    Ok(rows)
}

fn csv_error(table: Table, e: csv::Error) -> Error {
    match e.position() {
        Some(pos) => Error::InvalidRecord {
            table,
            line: pos.line(),
            reason: e.to_string(),
        },
        None => Error::Csv(format!("{}: {}", table, e)),
    }
}

fn required_key(table: Table, line: u64, key: String) -> Result<String> {
    if key.trim().is_empty() {
        return Err(Error::InvalidRecord {
            table,
            line,
            reason: "empty key".to_string(),
        });
    }
    Ok(key)
}

// Upstream writes NaN for missing numerics in some exports
#[inline]
fn defined(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}
