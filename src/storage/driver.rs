use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::Result;

/// Low-level key-value storage contract.
///
/// Works on raw bytes so the serialization format stays a concern of the
/// layer above. No transactions: multi-key updates are not atomic.
pub trait StorageDriver: Send + Sync {
    /// Stores or overwrites the value for a key.
    fn put(&self, key: &str, data: &[u8]) -> Result<()>;

    /// Returns the value for a key, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Lists every key starting with the given prefix, in no particular order.
    fn keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Removes a key. Returns `true` if the key existed.
    fn remove(&self, key: &str) -> Result<bool>;
}

/// Volatile driver backed by a map. Data is gone when the process exits;
/// used by tests and the `memory` backend.
#[derive(Default)]
pub struct MemoryDriver {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageDriver for MemoryDriver {
    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        self.entries.write().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .entries
            .read()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }
}

/// Driver mapping each key to one file inside a base directory.
///
/// Assumes a single process; concurrent writers are not guarded against.
pub struct FileDriver {
    base_dir: PathBuf,
}

impl FileDriver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        if !base_dir.exists() {
            std::fs::create_dir_all(&base_dir)?;
            info!("Created storage directory: {:?}", base_dir);
        }
        Ok(Self { base_dir })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl StorageDriver for FileDriver {
    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        debug!("Writing {} bytes to key {}", data.len(), key);
        std::fs::write(self.file_path(key), data)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match std::fs::read(self.file_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(prefix) {
                    keys.push(name.to_string());
                }
            }
        }
        Ok(keys)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        match std::fs::remove_file(self.file_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_contract(driver: &dyn StorageDriver) {
        assert!(driver.get("missing").unwrap().is_none());

        driver.put("cliente-1", b"one").unwrap();
        driver.put("cliente-2", b"two").unwrap();
        driver.put("medidor-1", b"m").unwrap();

        assert_eq!(driver.get("cliente-1").unwrap().unwrap(), b"one");

        let mut keys = driver.keys("cliente-").unwrap();
        keys.sort();
        assert_eq!(keys, vec!["cliente-1", "cliente-2"]);

        // Overwrite keeps a single entry
        driver.put("cliente-1", b"uno").unwrap();
        assert_eq!(driver.get("cliente-1").unwrap().unwrap(), b"uno");
        assert_eq!(driver.keys("cliente-").unwrap().len(), 2);

        assert!(driver.remove("cliente-1").unwrap());
        assert!(!driver.remove("cliente-1").unwrap());
        assert!(driver.get("cliente-1").unwrap().is_none());
    }

    #[test]
    fn test_memory_driver_contract() {
        driver_contract(&MemoryDriver::new());
    }

    #[test]
    fn test_file_driver_contract() {
        let dir = tempfile::tempdir().unwrap();
        let driver = FileDriver::new(dir.path().join("store")).unwrap();
        driver_contract(&driver);
    }

    #[test]
    fn test_file_driver_creates_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("nested").join("store");
        let driver = FileDriver::new(&base).unwrap();
        assert!(base.is_dir());
        assert_eq!(driver.keys("").unwrap().len(), 0);
    }
}
