//! PDF / image export of a rendered invoice.
//!
//! The invoice is rasterized once. For PDF output the raster is scaled to the
//! width of an A4 portrait page and, when taller than one page, repeated on
//! following pages shifted upwards so each page shows the next slice.

use std::path::{Path, PathBuf};

use billbook_invoicing::Invoice;

use crate::api::{InvoiceRenderer, PagePlacement, PdfWriter};
use crate::error::{ClientError, ClientResult};

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Place a `width_px` × `height_px` raster on as many A4 pages as it needs.
pub fn paginate(width_px: u32, height_px: u32) -> ClientResult<Vec<PagePlacement>> {
    if width_px == 0 || height_px == 0 {
        return Err(ClientError::Export(format!(
            "cannot paginate an empty image ({width_px}x{height_px})"
        )));
    }

    let image_height = f64::from(height_px) * A4_WIDTH_MM / f64::from(width_px);
    let placement = |page: usize, y_mm: f64| PagePlacement {
        page,
        x_mm: 0.0,
        y_mm,
        width_mm: A4_WIDTH_MM,
        height_mm: image_height,
    };

    let mut pages = vec![placement(0, 0.0)];
    let mut height_left = image_height - A4_HEIGHT_MM;
    while height_left > 0.0 {
        pages.push(placement(pages.len(), height_left - image_height));
        height_left -= A4_HEIGHT_MM;
    }
    Ok(pages)
}

pub fn pdf_file_name(invoice: &Invoice) -> String {
    format!("Invoice_{}.pdf", invoice.invoice_id)
}

pub fn image_file_name(invoice: &Invoice) -> String {
    format!("Invoice_{}.jpg", invoice.invoice_id)
}

/// Bytes ready to be written, with the name they should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Write into `dir`, returning the full path.
    pub fn save_in(&self, dir: &Path) -> ClientResult<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .map_err(|e| ClientError::Export(format!("{}: {e}", path.display())))?;
        Ok(path)
    }
}

pub struct Exporter<'a> {
    renderer: &'a dyn InvoiceRenderer,
    pdf: &'a dyn PdfWriter,
}

impl<'a> Exporter<'a> {
    pub fn new(renderer: &'a dyn InvoiceRenderer, pdf: &'a dyn PdfWriter) -> Self {
        Self { renderer, pdf }
    }

    pub async fn export_pdf(&self, invoice: &Invoice) -> ClientResult<ExportedFile> {
        let image = self.renderer.render_to_image(invoice).await?;
        let placements = paginate(image.width_px, image.height_px)?;
        let document = self.pdf.write_pdf(&image, &placements)?;

        tracing::info!(
            invoice_id = %invoice.invoice_id,
            pages = document.page_count,
            "invoice exported as PDF"
        );
        Ok(ExportedFile {
            file_name: pdf_file_name(invoice),
            bytes: document.bytes,
        })
    }

    pub async fn export_image(&self, invoice: &Invoice) -> ClientResult<ExportedFile> {
        let image = self.renderer.render_to_image(invoice).await?;
        tracing::info!(invoice_id = %invoice.invoice_id, "invoice exported as image");
        Ok(ExportedFile {
            file_name: image_file_name(invoice),
            bytes: image.bytes,
        })
    }
}
