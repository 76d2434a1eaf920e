use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::Invoice;
use crate::error::{Error, Result};
use crate::services::pdf::PdfGenerator;
use crate::services::tariff::TariffService;
use crate::storage::{ClientRepository, InvoiceRepository, MeterRepository, ReadingRepository};

/// Orchestrates repositories and the tariff service for invoice emission,
/// PDF export and client removal.
pub struct InvoiceService {
    clients: Arc<ClientRepository>,
    meters: Arc<MeterRepository>,
    readings: Arc<ReadingRepository>,
    invoices: Arc<InvoiceRepository>,
    tariffs: TariffService,
    pdf: Box<dyn PdfGenerator>,
}

impl InvoiceService {
    pub fn new(
        clients: Arc<ClientRepository>,
        meters: Arc<MeterRepository>,
        readings: Arc<ReadingRepository>,
        invoices: Arc<InvoiceRepository>,
        tariffs: TariffService,
        pdf: Box<dyn PdfGenerator>,
    ) -> Self {
        Self {
            clients,
            meters,
            readings,
            invoices,
            tariffs,
            pdf,
        }
    }

    /// Total kWh consumed by a client in one period, summed over the monthly
    /// reading of each of their meters. A client without meters consumes 0.
    pub fn monthly_kwh(&self, tax_id: &str, year: i32, month: u32) -> f64 {
        let meters = self.meters.list_by_client(tax_id);
        if meters.is_empty() {
            warn!("Client {} has no meters assigned", tax_id);
            return 0.0;
        }

        meters
            .iter()
            .flat_map(|meter| self.readings.list_by_meter_month(meter.code(), year, month))
            .map(|reading| reading.kwh)
            .sum()
    }

    /// Emits the invoice for a client and period, or returns the stored one
    /// if it was already emitted (idempotent by invoice key).
    pub fn emit_invoice(&self, tax_id: &str, year: i32, month: u32) -> Result<Invoice> {
        if let Some(existing) = self.invoices.get(tax_id, year, month) {
            debug!(
                "Invoice for {} {}/{} already emitted, returning stored record",
                tax_id, month, year
            );
            return Ok(existing);
        }

        let client = self
            .clients
            .get_by_tax_id(tax_id)
            .ok_or_else(|| Error::not_found(format!("client with tax id {}", tax_id)))?;

        let kwh = self.monthly_kwh(tax_id, year, month);
        let tariff = self.tariffs.tariff_for(&client);
        let breakdown = tariff.compute(kwh);

        let invoice = Invoice::issued(&client.tax_id, year, month, kwh, breakdown);
        self.invoices.save(&invoice)?;
        info!(
            "Emitted {} invoice {} for {:.2} kWh",
            tariff.name(),
            invoice.id,
            kwh
        );
        Ok(invoice)
    }

    /// All stored invoices of a client, newest period first.
    pub fn client_invoices(&self, tax_id: &str) -> Result<Vec<Invoice>> {
        self.invoices.list_by_client(tax_id)
    }

    /// Emits (or fetches) the invoice for the period and renders it to PDF.
    pub fn export_invoice_pdf(&self, tax_id: &str, year: i32, month: u32) -> Result<Vec<u8>> {
        let invoice = self.emit_invoice(tax_id, year, month)?;
        let client = self
            .clients
            .get_by_tax_id(tax_id)
            .ok_or_else(|| Error::not_found(format!("client with tax id {}", tax_id)))?;

        let mut clients = HashMap::new();
        clients.insert(client.tax_id.clone(), client);
        self.pdf.generate_invoices_pdf(&[invoice], &clients)
    }

    /// Renders every stored invoice of a client into one PDF.
    pub fn export_client_pdf(&self, tax_id: &str) -> Result<Vec<u8>> {
        let client = self
            .clients
            .get_by_tax_id(tax_id)
            .ok_or_else(|| Error::not_found(format!("client with tax id {}", tax_id)))?;
        let invoices = self.invoices.list_by_client(tax_id)?;
        if invoices.is_empty() {
            return Err(Error::not_found(format!("no invoices for client {}", tax_id)));
        }

        let mut clients = HashMap::new();
        clients.insert(client.tax_id.clone(), client);
        self.pdf.generate_invoices_pdf(&invoices, &clients)
    }

    /// Removes a client and their meter records. Readings and invoices are
    /// left in place and stay retrievable by direct key.
    pub fn delete_client_cascade(&self, tax_id: &str) -> Result<bool> {
        for code in self.meters.client_meter_codes(tax_id) {
            self.meters.delete(&code)?;
        }
        let removed = self.clients.delete(tax_id)?;
        if removed {
            info!("Deleted client {} and their meters", tax_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::TariffConfig;
    use crate::domain::{Client, InvoiceStatus, Meter, Reading};
    use crate::services::pdf::DocumentPdfGenerator;
    use crate::storage::driver::MemoryDriver;
    use crate::storage::store::DataStore;

    struct Fixture {
        clients: Arc<ClientRepository>,
        meters: Arc<MeterRepository>,
        readings: Arc<ReadingRepository>,
        invoices: Arc<InvoiceRepository>,
        service: InvoiceService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(DataStore::new(Box::new(MemoryDriver::new())));
        let clients = Arc::new(ClientRepository::new(store.clone()));
        let meters = Arc::new(MeterRepository::new(store.clone()));
        let readings = Arc::new(ReadingRepository::new(store.clone()));
        let invoices = Arc::new(InvoiceRepository::new(store));
        let service = InvoiceService::new(
            clients.clone(),
            meters.clone(),
            readings.clone(),
            invoices.clone(),
            TariffService::new(TariffConfig::default()),
            Box::new(DocumentPdfGenerator::new()),
        );
        Fixture {
            clients,
            meters,
            readings,
            invoices,
            service,
        }
    }

    fn seed_client(fx: &Fixture, tax_id: &str, address: &str) {
        fx.clients
            .create(&Client::new(tax_id, "Ana Pérez", "ana@example.com", address))
            .unwrap();
    }

    #[test]
    fn test_monthly_kwh_aggregates_across_meters() {
        let fx = fixture();
        seed_client(&fx, "11111111-1", "Av. Siempre Viva 742");
        fx.meters
            .create(&Meter::single_phase("M1", "Av. Siempre Viva 742", 5.5), "11111111-1")
            .unwrap();
        fx.meters
            .create(&Meter::three_phase("M2", "Av. Siempre Viva 742", 15.0, 0.93), "11111111-1")
            .unwrap();
        fx.readings.register(&Reading::new("M1", 2025, 11, 50.0)).unwrap();
        fx.readings.register(&Reading::new("M2", 2025, 11, 75.0)).unwrap();
        fx.readings.register(&Reading::new("M1", 2025, 10, 999.0)).unwrap();

        assert_eq!(fx.service.monthly_kwh("11111111-1", 2025, 11), 125.0);
    }

    #[test]
    fn test_monthly_kwh_without_meters_is_zero() {
        let fx = fixture();
        seed_client(&fx, "11111111-1", "Av. Siempre Viva 742");
        assert_eq!(fx.service.monthly_kwh("11111111-1", 2025, 11), 0.0);
    }

    #[test]
    fn test_emit_invoice_is_idempotent() {
        let fx = fixture();
        seed_client(&fx, "11111111-1", "Av. Siempre Viva 742");
        fx.meters
            .create(&Meter::single_phase("M1", "Av. Siempre Viva 742", 5.5), "11111111-1")
            .unwrap();
        fx.readings.register(&Reading::new("M1", 2025, 11, 100.0)).unwrap();

        let first = fx.service.emit_invoice("11111111-1", 2025, 11).unwrap();
        assert_eq!(first.status, InvoiceStatus::Issued);
        assert_eq!(first.breakdown.total, 15708.0);

        // Change the reading; the stored invoice wins on re-emission
        fx.readings.register(&Reading::new("M1", 2025, 11, 500.0)).unwrap();
        let second = fx.service.emit_invoice("11111111-1", 2025, 11).unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.total_kwh, first.total_kwh);
        assert_eq!(second.breakdown, first.breakdown);
    }

    #[test]
    fn test_emit_invoice_unknown_client_fails() {
        let fx = fixture();
        let err = fx.service.emit_invoice("99999999-9", 2025, 11).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_commercial_client_gets_commercial_rates() {
        let fx = fixture();
        seed_client(&fx, "22222222-2", "Local 5, Galería Centro");
        fx.meters
            .create(&Meter::single_phase("M9", "Local 5", 10.0), "22222222-2")
            .unwrap();
        fx.readings.register(&Reading::new("M9", 2025, 6, 100.0)).unwrap();

        let invoice = fx.service.emit_invoice("22222222-2", 2025, 6).unwrap();
        assert_eq!(invoice.breakdown.subtotal, 15000.0);
        assert_eq!(invoice.breakdown.charges, 7500.0);
    }

    #[test]
    fn test_export_invoice_pdf() {
        let fx = fixture();
        seed_client(&fx, "11111111-1", "Av. Siempre Viva 742");
        let bytes = fx.service.export_invoice_pdf("11111111-1", 2025, 11).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        // Export emitted the invoice as a side effect
        assert!(fx.invoices.get("11111111-1", 2025, 11).is_some());
    }

    #[test]
    fn test_export_client_pdf_requires_invoices() {
        let fx = fixture();
        seed_client(&fx, "11111111-1", "Av. Siempre Viva 742");
        assert!(matches!(
            fx.service.export_client_pdf("11111111-1"),
            Err(Error::NotFound(_))
        ));

        fx.service.emit_invoice("11111111-1", 2025, 10).unwrap();
        fx.service.emit_invoice("11111111-1", 2025, 11).unwrap();
        let bytes = fx.service.export_client_pdf("11111111-1").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_delete_client_cascade_leaves_orphans() {
        let fx = fixture();
        seed_client(&fx, "11111111-1", "Av. Siempre Viva 742");
        fx.meters
            .create(&Meter::single_phase("M1", "Av. Siempre Viva 742", 5.5), "11111111-1")
            .unwrap();
        fx.readings.register(&Reading::new("M1", 2025, 11, 50.0)).unwrap();
        fx.service.emit_invoice("11111111-1", 2025, 11).unwrap();

        assert!(fx.service.delete_client_cascade("11111111-1").unwrap());

        // Client and meter records are gone
        assert!(fx.clients.get_by_tax_id("11111111-1").is_none());
        assert!(fx.meters.get_by_code("M1").is_none());

        // Readings and invoices stay retrievable by direct key
        assert_eq!(fx.readings.list_by_meter_month("M1", 2025, 11).len(), 1);
        assert!(fx.invoices.get("11111111-1", 2025, 11).is_some());

        // Deleting again reports nothing removed
        assert!(!fx.service.delete_client_cascade("11111111-1").unwrap());
    }
}
