//! # Export Engine
//!
//! ## Renderer Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Startup: ExportEngine::detect()                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  can_render_spreadsheet() ?                                            │
//! │       │                                                                 │
//! │       ├── yes → XlsxRenderer   productos.xlsx                          │
//! │       └── no  → CsvRenderer    productos.csv  (fallback, not an error) │
//! │                                                                         │
//! │  export(products, path) → ExportOutcome { path, format }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use stock_core::Product;
use tracing::{info, warn};

use crate::delimited::CsvRenderer;
use crate::error::ExportResult;
use crate::renderer::{ExportFormat, TableRenderer};

/// Whether this build can write spreadsheets.
pub fn can_render_spreadsheet() -> bool {
    cfg!(feature = "xlsx")
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// File actually written.
    pub path: PathBuf,
    /// Format of that file.
    pub format: ExportFormat,
}

/// Renders product snapshots through one renderer chosen up front.
#[derive(Clone)]
pub struct ExportEngine {
    renderer: Arc<dyn TableRenderer>,
}

impl ExportEngine {
    /// Spreadsheet output when available, CSV otherwise.
    pub fn detect() -> Self {
        match Self::spreadsheet() {
            Ok(engine) => engine,
            Err(_) => {
                warn!("Spreadsheet export unavailable, falling back to CSV");
                Self::csv()
            }
        }
    }

    /// Spreadsheet output, or
    /// [`ExportError::CapabilityUnavailable`](crate::ExportError::CapabilityUnavailable).
    pub fn spreadsheet() -> ExportResult<Self> {
        spreadsheet_renderer().map(Self::with_renderer)
    }

    /// Delimited-text output.
    pub fn csv() -> Self {
        Self::with_renderer(Arc::new(CsvRenderer))
    }

    /// Uses a custom renderer.
    pub fn with_renderer(renderer: Arc<dyn TableRenderer>) -> Self {
        ExportEngine { renderer }
    }

    /// Format this engine writes.
    pub fn format(&self) -> ExportFormat {
        self.renderer.format()
    }

    /// Writes `products` in the order given.
    ///
    /// Callers pass the same filtered list they display, so the file
    /// matches what is on screen.
    pub fn export(&self, products: &[Product], path: impl AsRef<Path>) -> ExportResult<ExportOutcome> {
        let format = self.renderer.format();
        let path = self.renderer.render(products, path.as_ref())?;

        info!(
            path = %path.display(),
            %format,
            rows = products.len(),
            "Catalog exported"
        );

        Ok(ExportOutcome { path, format })
    }
}

#[cfg(feature = "xlsx")]
fn spreadsheet_renderer() -> ExportResult<Arc<dyn TableRenderer>> {
    Ok(Arc::new(crate::spreadsheet::XlsxRenderer))
}

#[cfg(not(feature = "xlsx"))]
fn spreadsheet_renderer() -> ExportResult<Arc<dyn TableRenderer>> {
    Err(crate::error::ExportError::CapabilityUnavailable)
}

impl std::fmt::Debug for ExportEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportEngine")
            .field("format", &self.format())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delimited::CSV_HEADER;
    use crate::error::ExportError;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn product(code: &str, name: &str, unit_price: f64, stock: i64) -> Product {
        Product {
            id: 1,
            code: code.to_string(),
            name: name.to_string(),
            unit_price,
            stock,
            barcode: Some("7790001".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_detect_matches_capability() {
        let engine = ExportEngine::detect();
        let expected = if can_render_spreadsheet() {
            ExportFormat::Spreadsheet
        } else {
            ExportFormat::Csv
        };
        assert_eq!(engine.format(), expected);
    }

    #[test]
    fn test_spreadsheet_reports_missing_capability() {
        let result = ExportEngine::spreadsheet();
        if can_render_spreadsheet() {
            assert_eq!(result.unwrap().format(), ExportFormat::Spreadsheet);
        } else {
            assert!(matches!(result, Err(ExportError::CapabilityUnavailable)));
        }
    }

    #[test]
    fn test_csv_export_contents() {
        let dir = tempfile::tempdir().unwrap();
        let products = [
            product("94319699", "billy", 1600.0, 40),
            product("A1", "Widget, large", 10.5, -2),
        ];

        let outcome = ExportEngine::csv()
            .export(&products, dir.path().join("productos.xlsx"))
            .unwrap();

        assert_eq!(outcome.format, ExportFormat::Csv);
        assert_eq!(outcome.path, dir.path().join("productos.csv"));

        let mut reader = csv::Reader::from_path(&outcome.path).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, CSV_HEADER);

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["94319699", "billy", "1600.00", "40"],
                vec!["A1", "Widget, large", "10.50", "-2"],
            ]
        );
    }

    #[test]
    fn test_csv_export_of_empty_list_has_header_only() {
        let dir = tempfile::tempdir().unwrap();

        let outcome = ExportEngine::csv()
            .export(&[], dir.path().join("vacio"))
            .unwrap();

        let text = std::fs::read_to_string(&outcome.path).unwrap();
        assert_eq!(text.trim_end(), "codigo,nombre,precio,stock");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no-such-dir").join("productos.csv");

        assert!(ExportEngine::csv().export(&[], target).is_err());
    }

    struct CountingRenderer(AtomicUsize);

    impl TableRenderer for CountingRenderer {
        fn format(&self) -> ExportFormat {
            ExportFormat::Csv
        }

        fn render(&self, products: &[Product], path: &Path) -> ExportResult<PathBuf> {
            self.0.fetch_add(products.len(), Ordering::SeqCst);
            Ok(path.to_path_buf())
        }
    }

    #[test]
    fn test_custom_renderer() {
        let renderer = Arc::new(CountingRenderer(AtomicUsize::new(0)));
        let engine = ExportEngine::with_renderer(renderer.clone());

        let outcome = engine
            .export(&[product("A1", "Widget", 1.0, 1)], "out.csv")
            .unwrap();

        assert_eq!(outcome.path, PathBuf::from("out.csv"));
        assert_eq!(renderer.0.load(Ordering::SeqCst), 1);
    }
}
