//! # stock-core: Pure Inventory Logic for Stockroom
//!
//! This crate holds the inventory rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Form layer (create / edit / scan dialogs)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stock-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │  parsing  │  │ validation│                  │   │
//! │  │   │  Product  │  │  "1.600,5"│  │  qty > 0  │                  │   │
//! │  │   │  Movement │  │  → 1600.5 │  │  price≥0  │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          stock-db (repositories, ledger)  /  stock-export       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Movement, MovementKind, ...)
//! - [`parsing`] - Locale-tolerant number parsing for typed prices/quantities
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules checked before anything is persisted
//!
//! ## Example Usage
//!
//! ```rust
//! use stock_core::parsing::parse_decimal;
//! use stock_core::MovementKind;
//!
//! assert_eq!(parse_decimal("1.600,50", 0.0), 1600.50);
//! assert_eq!(MovementKind::Out.signed(4), -4);
//! ```

pub mod error;
pub mod parsing;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use parsing::{parse_decimal, parse_quantity};
pub use types::*;

/// Default row limit for movement history queries.
pub const DEFAULT_MOVEMENT_LIMIT: u32 = 500;

/// Note attached to movements triggered from the scan input.
pub const SCAN_MOVEMENT_NOTE: &str = "Movimiento por escaneo";
