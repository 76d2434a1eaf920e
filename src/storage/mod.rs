// Storage layer: raw key-value drivers, the JSON store on top of them, and
// the per-entity repositories.

pub mod clients;
pub mod driver;
pub mod invoices;
pub mod meters;
pub mod readings;
pub mod store;

pub use clients::ClientRepository;
pub use driver::{FileDriver, MemoryDriver, StorageDriver};
pub use invoices::InvoiceRepository;
pub use meters::MeterRepository;
pub use readings::ReadingRepository;
pub use store::DataStore;
