use std::collections::HashMap;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use tracing::debug;

use crate::domain::{Client, Invoice, ToPdfTable};
use crate::error::{Error, Result};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 8.0;
const VALUE_COLUMN_MM: f32 = 110.0;

/// Renders invoices into a single PDF document.
pub trait PdfGenerator: Send + Sync {
    /// Generates one PDF containing every invoice in the slice; clients are
    /// looked up by tax id for the header lines.
    fn generate_invoices_pdf(
        &self,
        invoices: &[Invoice],
        clients: &HashMap<String, Client>,
    ) -> Result<Vec<u8>>;
}

/// `PdfGenerator` backed by `printpdf` builtin Helvetica fonts, one invoice
/// per page.
#[derive(Default)]
pub struct DocumentPdfGenerator;

impl DocumentPdfGenerator {
    pub fn new() -> Self {
        Self
    }
}

struct Fonts {
    title: IndirectFontRef,
    header: IndirectFontRef,
    body: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::pdf(e.to_string()))?;
        let body = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::pdf(e.to_string()))?;
        Ok(Self {
            title: bold.clone(),
            header: bold,
            body,
        })
    }
}

impl PdfGenerator for DocumentPdfGenerator {
    fn generate_invoices_pdf(
        &self,
        invoices: &[Invoice],
        clients: &HashMap<String, Client>,
    ) -> Result<Vec<u8>> {
        debug!("Rendering {} invoice(s) to PDF", invoices.len());

        let (doc, first_page, first_layer) = PdfDocument::new(
            "Boleta Electrónica",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "boleta",
        );
        let fonts = Fonts::load(&doc)?;

        let mut page = first_page;
        let mut layer_index = first_layer;
        for (i, invoice) in invoices.iter().enumerate() {
            if i > 0 {
                let (next_page, next_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "boleta");
                page = next_page;
                layer_index = next_layer;
            }
            let layer = doc.get_page(page).get_layer(layer_index);
            let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

            layer.use_text("Boleta Electrónica", 18.0, Mm(MARGIN_MM), Mm(y), &fonts.title);
            y -= 2.0 * LINE_HEIGHT_MM;

            let client_name = clients
                .get(&invoice.client_id)
                .map(|c| c.name.as_str())
                .unwrap_or("N/A");
            layer.use_text(
                format!("Cliente: {}", client_name),
                12.0,
                Mm(MARGIN_MM),
                Mm(y),
                &fonts.body,
            );
            y -= LINE_HEIGHT_MM;
            layer.use_text(
                format!("RUT: {}", invoice.client_id),
                12.0,
                Mm(MARGIN_MM),
                Mm(y),
                &fonts.body,
            );
            y -= LINE_HEIGHT_MM;
            layer.use_text(
                format!("Período: {}/{}", invoice.month, invoice.year),
                12.0,
                Mm(MARGIN_MM),
                Mm(y),
                &fonts.body,
            );
            y -= 2.0 * LINE_HEIGHT_MM;

            let table = invoice.to_pdf_table();
            layer.use_text(&table.headers[0], 12.0, Mm(MARGIN_MM), Mm(y), &fonts.header);
            layer.use_text(&table.headers[1], 12.0, Mm(VALUE_COLUMN_MM), Mm(y), &fonts.header);
            y -= LINE_HEIGHT_MM;

            for row in &table.rows {
                layer.use_text(&row[0], 12.0, Mm(MARGIN_MM), Mm(y), &fonts.body);
                layer.use_text(&row[1], 12.0, Mm(VALUE_COLUMN_MM), Mm(y), &fonts.body);
                y -= LINE_HEIGHT_MM;
            }
        }

        doc.save_to_bytes().map_err(|e| Error::pdf(e.to_string()))
    }
}
