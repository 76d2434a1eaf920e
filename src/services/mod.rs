// Business logic on top of the repositories

pub mod invoice;
pub mod pdf;
pub mod tariff;

pub use invoice::InvoiceService;
pub use pdf::{DocumentPdfGenerator, PdfGenerator};
pub use tariff::TariffService;
