use std::sync::Arc;

use tracing::debug;

use crate::domain::Client;
use crate::error::Result;
use crate::storage::store::DataStore;

/// Key prefix for client records; the full key is `cliente-{tax_id}`.
const PREFIX: &str = "cliente-";

/// Repository for `Client` records.
pub struct ClientRepository {
    store: Arc<DataStore>,
}

impl ClientRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    fn key(tax_id: &str) -> String {
        format!("{}{}", PREFIX, tax_id)
    }

    pub fn create(&self, client: &Client) -> Result<()> {
        debug!("Saving client {}", client.tax_id);
        self.store.save(&Self::key(&client.tax_id), client)
    }

    /// In a key-value store an update is the same write as a create.
    pub fn update(&self, client: &Client) -> Result<()> {
        self.create(client)
    }

    pub fn delete(&self, tax_id: &str) -> Result<bool> {
        self.store.delete(&Self::key(tax_id))
    }

    pub fn get_by_tax_id(&self, tax_id: &str) -> Option<Client> {
        self.store.read(&Self::key(tax_id))
    }

    /// Full prefix scan; the filter matches the name (case-insensitive) or
    /// the tax id as a substring. An empty filter lists everything.
    pub fn list(&self, filter: &str) -> Result<Vec<Client>> {
        let needle = filter.to_lowercase();
        let mut clients: Vec<Client> = self
            .store
            .list_keys(PREFIX)?
            .iter()
            .filter_map(|key| self.store.read::<Client>(key))
            .filter(|c| c.name.to_lowercase().contains(&needle) || c.tax_id.contains(filter))
            .collect();
        clients.sort_by(|a, b| a.tax_id.cmp(&b.tax_id));
        Ok(clients)
    }
}
