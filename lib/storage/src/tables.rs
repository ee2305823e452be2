use ahash::AHashMap;
use ordercast_core::{Customer, CustomerId, Location, LocationNumber, Result, Vendor, VendorId};
use std::collections::hash_map::Entry;
use std::io::Read;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::loader::{self, DataPaths, Row};

/// Row counts of a loaded reference set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub customers: usize,
    pub locations: usize,
    pub vendors: usize,
    /// Rows dropped because an earlier row already used the same key
    pub duplicates: usize,
}

/// The three reference tables, immutable once built
#[derive(Debug, Default)]
pub struct ReferenceData {
    customers: AHashMap<CustomerId, Customer>,
    locations: AHashMap<(CustomerId, LocationNumber), Location>,
    locations_by_customer: AHashMap<CustomerId, Vec<LocationNumber>>,
    vendors: AHashMap<VendorId, Vendor>,
    duplicates: usize,
}

impl ReferenceData {
    /// Read the three CSV files named by `paths`
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let started = Instant::now();
        let data = Self::from_readers(
            loader::open(&paths.customers)?,
            loader::open(&paths.locations)?,
            loader::open(&paths.vendors)?,
        )?;

        let stats = data.stats();
        info!(
            customers = stats.customers,
            locations = stats.locations,
            vendors = stats.vendors,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "reference data loaded"
        );
        Ok(data)
    }

    pub fn from_readers<C: Read, L: Read, V: Read>(customers: C, locations: L, vendors: V) -> Result<Self> {
        Ok(Self::from_rows(
            loader::read_customers(customers)?,
            loader::read_locations(locations)?,
            loader::read_vendors(vendors)?,
        ))
    }

    /// Build the tables from parsed rows. The first row for a key wins.
    pub fn from_rows(customers: Vec<Row<Customer>>, locations: Vec<Row<Location>>, vendors: Vec<Row<Vendor>>) -> Self {
        let mut data = Self::default();

        for Row { line, value } in customers {
            match data.customers.entry(value.id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(_) => {
                    debug!(table = "customers", line, key = %value.id, "duplicate key ignored");
                    data.duplicates += 1;
                }
            }
        }

        for Row { line, value } in locations {
            let key = (value.customer_id.clone(), value.number);
            match data.locations.entry(key) {
                Entry::Vacant(slot) => {
                    data.locations_by_customer
                        .entry(value.customer_id.clone())
                        .or_default()
                        .push(value.number);
                    slot.insert(value);
                }
                Entry::Occupied(_) => {
                    debug!(table = "locations", line, key = %value.customer_id, number = value.number.get(), "duplicate key ignored");
                    data.duplicates += 1;
                }
            }
        }
        for numbers in data.locations_by_customer.values_mut() {
            numbers.sort_unstable();
        }

        for Row { line, value } in vendors {
            match data.vendors.entry(value.id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(_) => {
                    debug!(table = "vendors", line, key = %value.id, "duplicate key ignored");
                    data.duplicates += 1;
                }
            }
        }

        if data.duplicates > 0 {
            warn!(duplicates = data.duplicates, "reference data contains duplicate keys, first occurrence kept");
        }

        data
    }

    pub fn customer(&self, id: &CustomerId) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn location(&self, customer_id: &CustomerId, number: LocationNumber) -> Option<&Location> {
        self.locations.get(&(customer_id.clone(), number))
    }

    pub fn vendor(&self, id: &VendorId) -> Option<&Vendor> {
        self.vendors.get(id)
    }

    /// All customer ids, sorted
    pub fn customer_ids(&self) -> Vec<&CustomerId> {
        let mut ids: Vec<_> = self.customers.keys().collect();
        ids.sort();
        ids
    }

    /// Location numbers on file for a customer, sorted. Empty for unknown customers.
    pub fn location_numbers(&self, customer_id: &CustomerId) -> &[LocationNumber] {
        self.locations_by_customer
            .get(customer_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All vendor ids, sorted
    pub fn vendor_ids(&self) -> Vec<&VendorId> {
        let mut ids: Vec<_> = self.vendors.keys().collect();
        ids.sort();
        ids
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            customers: self.customers.len(),
            locations: self.locations.len(),
            vendors: self.vendors.len(),
            duplicates: self.duplicates,
        }
    }
}
