use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::storage::driver::StorageDriver;

/// JSON persistence on top of a raw key-value driver.
///
/// Encoding is pretty-printed JSON, one record per key. Reads are lenient:
/// a missing key or an undecodable payload both come back as `None`, with
/// a diagnostic logged for the latter. Meter polymorphism is carried by the
/// serde tag on the `Meter` enum itself, so the store needs no type registry.
pub struct DataStore {
    driver: Box<dyn StorageDriver>,
}

impl DataStore {
    pub fn new(driver: Box<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Serializes a record and stores it under the given key.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.driver.put(key, &bytes)
    }

    /// Reads and decodes a record. Absent keys, driver failures and
    /// malformed payloads all yield `None`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.driver.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read key {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to decode record at key {}: {}", key, e);
                None
            }
        }
    }

    pub fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        self.driver.keys(prefix)
    }

    pub fn delete(&self, key: &str) -> Result<bool> {
        self.driver.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Meter;
    use crate::storage::driver::MemoryDriver;

    fn store() -> DataStore {
        DataStore::new(Box::new(MemoryDriver::new()))
    }

    #[test]
    fn test_save_and_read() {
        let store = store();
        store.save("k", &vec!["a".to_string(), "b".to_string()]).unwrap();
        let back: Vec<String> = store.read("k").unwrap();
        assert_eq!(back, vec!["a", "b"]);
    }

    #[test]
    fn test_read_missing_key_is_none() {
        let store = store();
        assert!(store.read::<Vec<String>>("nope").is_none());
    }

    #[test]
    fn test_malformed_payload_reads_as_none() {
        let driver = MemoryDriver::new();
        driver.put("bad", b"{ not json").unwrap();
        let store = DataStore::new(Box::new(driver));
        assert!(store.read::<Vec<String>>("bad").is_none());
    }

    #[test]
    fn test_meter_variants_survive_the_store() {
        let store = store();
        store
            .save("medidor-A", &Meter::single_phase("A", "Calle 1", 5.5))
            .unwrap();
        store
            .save("medidor-B", &Meter::three_phase("B", "Calle 2", 15.0, 0.93))
            .unwrap();

        let a: Meter = store.read("medidor-A").unwrap();
        let b: Meter = store.read("medidor-B").unwrap();
        assert!(matches!(a, Meter::SinglePhase { .. }));
        match b {
            Meter::ThreePhase { power_factor, .. } => assert_eq!(power_factor, 0.93),
            _ => panic!("expected a three-phase meter"),
        }
    }
}
