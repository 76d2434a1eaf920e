use std::sync::Arc;

use tracing::debug;

use crate::domain::Reading;
use crate::error::Result;
use crate::storage::store::DataStore;

/// Key prefix for readings; the full key is `lectura-{meter_code}-{year}-{month}`,
/// so the store holds at most one reading per meter and period.
const PREFIX: &str = "lectura-";

/// Repository for consumption readings.
pub struct ReadingRepository {
    store: Arc<DataStore>,
}

impl ReadingRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    fn key(meter_code: &str, year: i32, month: u32) -> String {
        format!("{}{}-{}-{}", PREFIX, meter_code, year, month)
    }

    /// Registers a reading; a second reading for the same meter and period
    /// overwrites the first.
    pub fn register(&self, reading: &Reading) -> Result<()> {
        debug!(
            "Registering reading for meter {} period {}/{}",
            reading.meter_code, reading.month, reading.year
        );
        self.store.save(
            &Self::key(&reading.meter_code, reading.year, reading.month),
            reading,
        )
    }

    /// Readings of one meter in one period: zero or one record by key schema.
    pub fn list_by_meter_month(&self, meter_code: &str, year: i32, month: u32) -> Vec<Reading> {
        self.store
            .read::<Reading>(&Self::key(meter_code, year, month))
            .into_iter()
            .collect()
    }

    /// Most recent reading of a meter, by `year*100 + month` over a prefix
    /// scan of all its readings.
    pub fn latest(&self, meter_code: &str) -> Option<Reading> {
        let prefix = format!("{}{}-", PREFIX, meter_code);
        let keys = match self.store.list_keys(&prefix) {
            Ok(keys) => keys,
            Err(_) => return None,
        };
        keys.iter()
            .filter_map(|key| self.store.read::<Reading>(key))
            .max_by_key(Reading::period_ord)
    }
}
