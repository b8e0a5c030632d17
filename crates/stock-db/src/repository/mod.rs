//! # Repository Module
//!
//! Database repository implementations for the inventory store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  Form layer / scan input                                               │
//! │       │                                                                 │
//! │       │  db.products().list("wid")                                     │
//! │       ▼                                                                 │
//! │  ProductRepository                    MovementRepository               │
//! │  ├── list(filter)                     ├── list(product_id?, limit)     │
//! │  ├── create / get / get_by_code       └── insert (ledger only)         │
//! │  ├── find_for_scan                                                     │
//! │  └── update / delete / count                                           │
//! │       │                                        ▲                        │
//! │       │                                        │                        │
//! │       ▼                               StockLedger (ledger.rs)          │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD and search
//! - [`MovementRepository`](movement::MovementRepository) - Movement history

pub mod movement;
pub mod product;
