//! # Error Types
//!
//! Domain-specific error types for stock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stock-core errors (this file)                                         │
//! │  ├── CoreError        - Ledger rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stock-db errors (separate crate)                                      │
//! │  └── DbError          - Persistence failures (wraps CoreError)         │
//! │                                                                         │
//! │  stock-export errors (separate crate)                                  │
//! │  └── ExportError      - Rendering / capability failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing never produces an error: see [`crate::parsing`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Inventory rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An `OUT` movement would take stock below zero while the ledger is
    /// configured to reject negative stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Restar Stock (qty: 5)
    ///      │
    ///      ▼
    /// Guarded update: stock + (-5) >= 0 ?   available = 3
    ///      │
    ///      ▼
    /// InsufficientStock { code: "A1", available: 3, requested: 5 }
    /// ```
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any mutation happens, so the caller can simply re-prompt.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater (and a real number).
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// A movement referenced a product id that does not exist.
    #[error("product {0} does not exist")]
    UnknownProduct(i64),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
