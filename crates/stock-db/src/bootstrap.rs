//! # Bootstrap Seeding
//!
//! Inserts a small example catalog into a brand-new database so the first
//! launch shows something to work with.
//!
//! Runs on every startup, after migrations. It only writes when the product
//! table is empty, and the emptiness check lives inside the same statement
//! as the insert:
//!
//! ```text
//! INSERT OR IGNORE INTO products (...)
//! SELECT column1, ... FROM (VALUES (...), (...), (...))
//! WHERE NOT EXISTS (SELECT 1 FROM products)
//! ```
//!
//! Two processes opening the same fresh file serialize on the SQLite write
//! lock; the second one finds the table populated and inserts nothing.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::DbResult;

/// `(code, name, unit price, stock)` of the example catalog.
pub const EXAMPLE_CATALOG: &[(&str, &str, f64, i64)] = &[
    ("94319699", "billy", 1600.0, 40),
    ("56070724", "evan", 1600.0, 30),
    ("94466555", "shay", 0.0, 20),
];

/// Seeds [`EXAMPLE_CATALOG`] when no product exists yet.
///
/// Returns the number of rows inserted.
pub async fn seed_if_empty(pool: &SqlitePool) -> DbResult<u64> {
    let now = Utc::now();

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "INSERT OR IGNORE INTO products (code, name, price, stock, barcode, created_at, updated_at) \
         SELECT column1, column2, column3, column4, column5, column6, column7 FROM (",
    );
    query.push_values(EXAMPLE_CATALOG, |mut row, (code, name, price, stock)| {
        row.push_bind(*code)
            .push_bind(*name)
            .push_bind(*price)
            .push_bind(*stock)
            .push_bind(None::<String>)
            .push_bind(now)
            .push_bind(now);
    });
    query.push(") WHERE NOT EXISTS (SELECT 1 FROM products)");

    let inserted = query.build().execute(pool).await?.rows_affected();

    if inserted > 0 {
        info!(count = inserted, "Seeded example catalog");
    } else {
        debug!("Catalog already populated, skipping seed");
    }

    Ok(inserted)
}

// =============================================================================
// Unit Tests
// =============================================================================
