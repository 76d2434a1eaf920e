use std::sync::Arc;

use tracing::debug;

use crate::domain::Meter;
use crate::error::Result;
use crate::storage::store::DataStore;

/// Key prefix for meter records; the full key is `medidor-{code}`.
const PREFIX: &str = "medidor-";

/// Secondary index mapping a client's tax id to the codes of their meters.
/// A plain key-value store cannot answer "meters of client X" without it.
const CLIENT_INDEX_PREFIX: &str = "idx-cliente-medidores-";

/// Repository for `Meter` records plus the client->meters index.
pub struct MeterRepository {
    store: Arc<DataStore>,
}

impl MeterRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    fn key(code: &str) -> String {
        format!("{}{}", PREFIX, code)
    }

    fn index_key(tax_id: &str) -> String {
        format!("{}{}", CLIENT_INDEX_PREFIX, tax_id)
    }

    /// Stores the meter and adds its code to the owning client's index.
    /// The two writes are separate puts; there is no multi-key atomicity.
    pub fn create(&self, meter: &Meter, tax_id: &str) -> Result<()> {
        debug!("Saving meter {} for client {}", meter.code(), tax_id);
        self.store.save(&Self::key(meter.code()), meter)?;

        let mut codes = self.client_meter_codes(tax_id);
        if !codes.iter().any(|c| c == meter.code()) {
            codes.push(meter.code().to_string());
        }
        self.store.save(&Self::index_key(tax_id), &codes)
    }

    pub fn get_by_code(&self, code: &str) -> Option<Meter> {
        self.store.read(&Self::key(code))
    }

    /// Meters of a client, resolved through the index. An absent index means
    /// an empty list; codes whose record is gone are silently dropped.
    pub fn list_by_client(&self, tax_id: &str) -> Vec<Meter> {
        self.client_meter_codes(tax_id)
            .iter()
            .filter_map(|code| self.get_by_code(code))
            .collect()
    }

    pub fn update(&self, meter: &Meter) -> Result<()> {
        self.store.save(&Self::key(meter.code()), meter)
    }

    /// Removes the meter record only. The code is left behind in the client
    /// index; `list_by_client` tolerates the dangling entry.
    pub fn delete(&self, code: &str) -> Result<bool> {
        self.store.delete(&Self::key(code))
    }

    /// Codes registered in a client's index, empty when the index is absent.
    pub fn client_meter_codes(&self, tax_id: &str) -> Vec<String> {
        self.store
            .read::<Vec<String>>(&Self::index_key(tax_id))
            .unwrap_or_default()
    }
}
