use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::pdf::{format_amount, PdfTable, ToPdfTable};
use crate::domain::tariff::TariffBreakdown;

/// An invoice ("boleta") for one client and billing period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client_id: String,
    pub year: i32,
    pub month: u32,
    pub total_kwh: f64,
    pub breakdown: TariffBreakdown,
    pub status: InvoiceStatus,
}

/// Invoice lifecycle. Emission only ever produces `Issued`; the remaining
/// states exist for records imported or updated out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Issued,
    Sent,
    Paid,
    Voided,
}

impl Invoice {
    pub fn issued(
        client_id: impl Into<String>,
        year: i32,
        month: u32,
        total_kwh: f64,
        breakdown: TariffBreakdown,
    ) -> Self {
        let client_id = client_id.into();
        let now = Utc::now();
        Self {
            id: format!("bol-{}-{}-{}", client_id, year, month),
            created_at: now,
            updated_at: now,
            client_id,
            year,
            month,
            total_kwh,
            breakdown,
            status: InvoiceStatus::Issued,
        }
    }
}

impl ToPdfTable for Invoice {
    fn to_pdf_table(&self) -> PdfTable {
        PdfTable {
            headers: vec!["Concepto".to_string(), "Valor".to_string()],
            rows: vec![
                vec!["Cliente ID".to_string(), self.client_id.clone()],
                vec!["Período".to_string(), format!("{}/{}", self.month, self.year)],
                vec!["Consumo (kWh)".to_string(), format_amount(self.total_kwh)],
                vec!["Subtotal".to_string(), format_amount(self.breakdown.subtotal)],
                vec![
                    "Cargos Adicionales".to_string(),
                    format_amount(self.breakdown.charges),
                ],
                vec!["IVA (19%)".to_string(), format_amount(self.breakdown.tax)],
                vec!["Total a Pagar".to_string(), format_amount(self.breakdown.total)],
            ],
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Issued => write!(f, "issued"),
            InvoiceStatus::Sent => write!(f, "sent"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Voided => write!(f, "voided"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_invoice_id_and_status() {
        let breakdown = TariffBreakdown {
            kwh: 125.0,
            subtotal: 15000.0,
            charges: 1200.0,
            tax: 3078.0,
            total: 19278.0,
        };
        let invoice = Invoice::issued("11111111-1", 2025, 11, 125.0, breakdown);
        assert_eq!(invoice.id, "bol-11111111-1-2025-11");
        assert_eq!(invoice.status, InvoiceStatus::Issued);
    }

    #[test]
    fn test_pdf_table_layout() {
        let breakdown = TariffBreakdown {
            kwh: 100.0,
            subtotal: 12000.0,
            charges: 1200.0,
            tax: 2508.0,
            total: 15708.0,
        };
        let invoice = Invoice::issued("11111111-1", 2025, 3, 100.0, breakdown);
        let table = invoice.to_pdf_table();
        assert_eq!(table.headers, vec!["Concepto", "Valor"]);
        assert_eq!(table.rows.len(), 7);
        assert_eq!(table.rows[1], vec!["Período", "3/2025"]);
        assert_eq!(table.rows[6], vec!["Total a Pagar", "15708.00"]);
    }
}
