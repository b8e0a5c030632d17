//! # stock-db: Database Layer for Stockroom
//!
//! This crate provides persistence for the inventory ledger.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Form layer (create / edit / scan)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     stock-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  + Ledger     │    │  + Bootstrap │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 001_init.sql │  │   │
//! │  │   │ StoreConfig   │    │ MovementRepo  │    │ example      │  │   │
//! │  │   │               │    │ StockLedger   │    │ catalog      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    SQLite (inventario.db)                       │   │
//! │  │   products | movements | _sqlx_migrations                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,ignore
//! use stock_db::{Database, StoreConfig};
//! use stock_core::MovementKind;
//!
//! let db = Database::new(StoreConfig::from_env()?.db_config()).await?;
//!
//! let billy = db.products().get_by_code("94319699").await?.unwrap();
//! let billy = db.ledger().apply_movement(billy.id, MovementKind::Out, 2, 1600.0, None).await?;
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use config::{resolve_database_path, StoreConfig, DB_PATH_ENV};
pub use error::{DbError, DbResult};
pub use ledger::StockLedger;
pub use pool::{Database, DbConfig};
pub use repository::movement::MovementRepository;
pub use repository::product::ProductRepository;
