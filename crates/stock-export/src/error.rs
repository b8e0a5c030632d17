//! # Export Error Types

use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The spreadsheet renderer was requested but is not compiled in.
    ///
    /// [`ExportEngine::detect`](crate::ExportEngine::detect) never returns
    /// this: it falls back to CSV instead.
    #[error("Spreadsheet export is not available in this build")]
    CapabilityUnavailable,

    /// Creating or writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet writer error.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
}

#[cfg(feature = "xlsx")]
impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Spreadsheet(err.to_string())
    }
}
