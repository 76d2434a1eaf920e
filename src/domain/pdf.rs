/// A two-dimensional table of strings, the intermediate form every
/// PDF-exportable record is reduced to before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Records that can be rendered into a PDF table.
pub trait ToPdfTable {
    fn to_pdf_table(&self) -> PdfTable;
}

/// Formats a monetary or kWh amount with exactly two decimals,
/// e.g. `1234.5` -> `"1234.50"`.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_pads_decimals() {
        assert_eq!(format_amount(1234.5), "1234.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(15708.0), "15708.00");
    }
}
