//! # Spreadsheet Renderer
//!
//! Writes a single-sheet `.xlsx` workbook:
//! - sheet `Productos`
//! - bold header row
//! - price as currency, stock as integer
//! - columns sized to their longest cell, capped at [`MAX_COLUMN_WIDTH`]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};
use stock_core::Product;
use tracing::debug;

use crate::error::ExportResult;
use crate::renderer::{row_text, ExportFormat, TableRenderer};

/// Worksheet name.
pub const SHEET_NAME: &str = "Productos";

/// Header row of the spreadsheet export.
pub const SPREADSHEET_HEADER: [&str; 4] = ["Código", "Nombre", "Precio Unitario", "Stock"];

/// Widest a column is allowed to grow, in characters.
pub const MAX_COLUMN_WIDTH: usize = 60;

const PRICE_FORMAT: &str = "\"$\"#,##0.00";
const STOCK_FORMAT: &str = "#,##0";

/// Writes products as an Excel workbook.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRenderer;

impl TableRenderer for XlsxRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Spreadsheet
    }

    fn render(&self, products: &[Product], path: &Path) -> ExportResult<PathBuf> {
        debug!(path = %path.display(), rows = products.len(), "Writing workbook");

        let header = Format::new().set_bold();
        let price = Format::new().set_num_format(PRICE_FORMAT);
        let stock = Format::new().set_num_format(STOCK_FORMAT);
        let text = Format::new();

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, title) in SPREADSHEET_HEADER.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header)?;
        }

        for (index, product) in products.iter().enumerate() {
            let row = index as u32 + 1;
            sheet.write_string_with_format(row, 0, &product.code, &text)?;
            sheet.write_string_with_format(row, 1, &product.name, &text)?;
            sheet.write_number_with_format(row, 2, product.unit_price, &price)?;
            sheet.write_number_with_format(row, 3, product.stock as f64, &stock)?;
        }

        for (col, width) in column_widths(products).into_iter().enumerate() {
            sheet.set_column_width(col as u16, width as f64)?;
        }

        workbook.save(path)?;
        Ok(path.to_path_buf())
    }
}

/// Width of each column: longest cell text (header included) plus 2,
/// capped at [`MAX_COLUMN_WIDTH`].
pub fn column_widths(products: &[Product]) -> [usize; 4] {
    let mut widths = SPREADSHEET_HEADER.map(|title| title.chars().count());

    for product in products {
        for (width, cell) in widths.iter_mut().zip(row_text(product)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    widths.map(|w| (w + 2).min(MAX_COLUMN_WIDTH))
}

// =============================================================================
// Unit Tests
// =============================================================================
