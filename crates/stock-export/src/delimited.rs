//! # Delimited-Text Renderer
//!
//! The fallback format: always available, no formatting, two-decimal prices
//! with no currency symbol.
//!
//! ```text
//! codigo,nombre,precio,stock
//! 94319699,billy,1600.00,40
//! A1,"Widget, large",10.00,4
//! ```

use std::path::{Path, PathBuf};

use stock_core::Product;
use tracing::debug;

use crate::error::ExportResult;
use crate::renderer::{row_text, ExportFormat, TableRenderer};

/// Header row of the delimited-text export.
pub const CSV_HEADER: [&str; 4] = ["codigo", "nombre", "precio", "stock"];

/// Writes products as comma-separated text.
///
/// The requested extension is replaced with `.csv`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl TableRenderer for CsvRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, products: &[Product], path: &Path) -> ExportResult<PathBuf> {
        let path = path.with_extension(ExportFormat::Csv.extension());
        debug!(path = %path.display(), rows = products.len(), "Writing CSV");

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(CSV_HEADER)?;
        for product in products {
            writer.write_record(row_text(product))?;
        }
        writer.flush()?;

        Ok(path)
    }
}
