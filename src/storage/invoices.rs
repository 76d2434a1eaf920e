use std::sync::Arc;

use tracing::debug;

use crate::domain::Invoice;
use crate::error::Result;
use crate::storage::store::DataStore;

/// Key prefix for invoices; the full key is `boleta-{tax_id}-{year}-{month}`.
const PREFIX: &str = "boleta-";

/// Repository for `Invoice` records.
pub struct InvoiceRepository {
    store: Arc<DataStore>,
}

impl InvoiceRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    fn key(tax_id: &str, year: i32, month: u32) -> String {
        format!("{}{}-{}-{}", PREFIX, tax_id, year, month)
    }

    pub fn save(&self, invoice: &Invoice) -> Result<()> {
        debug!(
            "Saving invoice for client {} period {}/{}",
            invoice.client_id, invoice.month, invoice.year
        );
        self.store.save(
            &Self::key(&invoice.client_id, invoice.year, invoice.month),
            invoice,
        )
    }

    pub fn get(&self, tax_id: &str, year: i32, month: u32) -> Option<Invoice> {
        self.store.read(&Self::key(tax_id, year, month))
    }

    /// All invoices of one client, newest period first.
    pub fn list_by_client(&self, tax_id: &str) -> Result<Vec<Invoice>> {
        let prefix = format!("{}{}-", PREFIX, tax_id);
        let mut invoices: Vec<Invoice> = self
            .store
            .list_keys(&prefix)?
            .iter()
            .filter_map(|key| self.store.read::<Invoice>(key))
            .collect();
        invoices.sort_by_key(|i| std::cmp::Reverse(i64::from(i.year) * 100 + i64::from(i.month)));
        Ok(invoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TariffBreakdown;
    use crate::storage::driver::MemoryDriver;

    fn repo() -> InvoiceRepository {
        InvoiceRepository::new(Arc::new(DataStore::new(Box::new(MemoryDriver::new()))))
    }

    fn invoice(tax_id: &str, year: i32, month: u32) -> Invoice {
        let breakdown = TariffBreakdown {
            kwh: 100.0,
            subtotal: 12000.0,
            charges: 1200.0,
            tax: 2508.0,
            total: 15708.0,
        };
        Invoice::issued(tax_id, year, month, 100.0, breakdown)
    }

    #[test]
    fn test_save_and_get_by_period() {
        let repo = repo();
        repo.save(&invoice("11111111-1", 2025, 11)).unwrap();
        assert!(repo.get("11111111-1", 2025, 11).is_some());
        assert!(repo.get("11111111-1", 2025, 12).is_none());
        assert!(repo.get("22222222-2", 2025, 11).is_none());
    }

    #[test]
    fn test_list_by_client_sorted_newest_first() {
        let repo = repo();
        repo.save(&invoice("11111111-1", 2025, 1)).unwrap();
        repo.save(&invoice("11111111-1", 2024, 12)).unwrap();
        repo.save(&invoice("11111111-1", 2025, 3)).unwrap();
        repo.save(&invoice("22222222-2", 2025, 1)).unwrap();

        let invoices = repo.list_by_client("11111111-1").unwrap();
        let periods: Vec<(i32, u32)> = invoices.iter().map(|i| (i.year, i.month)).collect();
        assert_eq!(periods, vec![(2025, 3), (2025, 1), (2024, 12)]);
    }
}
