// Domain entities for the billing system

pub mod client;
pub mod invoice;
pub mod meter;
pub mod pdf;
pub mod reading;
pub mod tariff;

pub use client::{Client, ClientStatus};
pub use invoice::{Invoice, InvoiceStatus};
pub use meter::Meter;
pub use pdf::{format_amount, PdfTable, ToPdfTable};
pub use reading::Reading;
pub use tariff::{Tariff, TariffBreakdown};
