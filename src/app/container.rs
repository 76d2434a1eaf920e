use std::sync::Arc;

use tracing::info;

use crate::app::config::{AppConfig, StorageBackend};
use crate::error::Result;
use crate::platform::AppPaths;
use crate::services::{DocumentPdfGenerator, InvoiceService, TariffService};
use crate::storage::{
    ClientRepository, DataStore, FileDriver, InvoiceRepository, MemoryDriver, MeterRepository,
    ReadingRepository, StorageDriver,
};

/// Composition root. Builds the driver from the configuration, wires the
/// repositories and services by constructor injection, and hands out shared
/// references to them.
pub struct AppContainer {
    pub clients: Arc<ClientRepository>,
    pub meters: Arc<MeterRepository>,
    pub readings: Arc<ReadingRepository>,
    pub invoices: Arc<InvoiceRepository>,
    pub invoice_service: InvoiceService,
}

impl AppContainer {
    pub fn new(config: &AppConfig, paths: &AppPaths) -> Result<Self> {
        let driver: Box<dyn StorageDriver> = match config.storage.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage backend");
                Box::new(MemoryDriver::new())
            }
            StorageBackend::File => {
                let dir = config
                    .storage
                    .data_dir
                    .clone()
                    .unwrap_or_else(|| paths.store_dir());
                info!("Using file storage backend at {:?}", dir);
                Box::new(FileDriver::new(dir)?)
            }
        };

        let store = Arc::new(DataStore::new(driver));
        let clients = Arc::new(ClientRepository::new(store.clone()));
        let meters = Arc::new(MeterRepository::new(store.clone()));
        let readings = Arc::new(ReadingRepository::new(store.clone()));
        let invoices = Arc::new(InvoiceRepository::new(store));

        let invoice_service = InvoiceService::new(
            clients.clone(),
            meters.clone(),
            readings.clone(),
            invoices.clone(),
            TariffService::new(config.tariff.clone()),
            Box::new(DocumentPdfGenerator::new()),
        );

        Ok(Self {
            clients,
            meters,
            readings,
            invoices,
            invoice_service,
        })
    }
}
