//! # stock-export: Catalog Export for Stockroom
//!
//! Turns the product list a user is looking at into a file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stock-db: products().list(filter)                                     │
//! │       │  Vec<Product>                                                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 stock-export (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ExportEngine ──► dyn TableRenderer                            │   │
//! │  │                     ├── XlsxRenderer  (feature "xlsx")          │   │
//! │  │                     └── CsvRenderer   (always)                  │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE ACCESS • READS SNAPSHOTS ONLY                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,ignore
//! let engine = ExportEngine::detect();
//! let products = db.products().list(&filter).await?;
//! let outcome = engine.export(&products, "productos.xlsx")?;
//! println!("Exported {} as {}", outcome.path.display(), outcome.format);
//! ```

pub mod delimited;
pub mod engine;
pub mod error;
pub mod renderer;
#[cfg(feature = "xlsx")]
pub mod spreadsheet;

pub use delimited::CsvRenderer;
pub use engine::{can_render_spreadsheet, ExportEngine, ExportOutcome};
pub use error::{ExportError, ExportResult};
pub use renderer::{ExportFormat, TableRenderer};
#[cfg(feature = "xlsx")]
pub use spreadsheet::XlsxRenderer;
