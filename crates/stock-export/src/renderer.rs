//! # Table Renderers
//!
//! Every export format implements [`TableRenderer`]. The engine holds one
//! renderer, chosen once, and never branches on the format itself.
//!
//! ## Columns
//! ```text
//! ┌──────────┬────────────┬──────────────────┬────────┐
//! │  Código  │  Nombre    │  Precio Unitario │  Stock │
//! ├──────────┼────────────┼──────────────────┼────────┤
//! │ 94319699 │ billy      │        $1,600.00 │     40 │
//! │ A1       │ Widget     │           $10.00 │      4 │
//! └──────────┴────────────┴──────────────────┴────────┘
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use stock_core::Product;

use crate::error::ExportResult;

/// Output formats the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Office Open XML workbook.
    Spreadsheet,
    /// Comma-separated text.
    Csv,
}

impl ExportFormat {
    /// File extension written by this format.
    pub const fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Renders a product snapshot to a file.
pub trait TableRenderer: Send + Sync {
    /// The format this renderer produces.
    fn format(&self) -> ExportFormat;

    /// Writes `products`, in the given order, near `path`.
    ///
    /// Returns the path actually written, which may differ in extension
    /// from the requested one.
    fn render(&self, products: &[Product], path: &Path) -> ExportResult<PathBuf>;
}

/// Plain-text form of a product row: code, name, two-decimal price, stock.
pub(crate) fn row_text(product: &Product) -> [String; 4] {
    [
        product.code.clone(),
        product.name.clone(),
        format!("{:.2}", product.unit_price),
        product.stock.to_string(),
    ]
}
