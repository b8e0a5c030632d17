//! # Database Migrations
//!
//! Embedded SQL migrations for the inventory store.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Startup                                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (created if missing)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare embedded migrations vs applied                                │
//! │       │                                                                 │
//! │       └── 001_initial_schema.sql  products + movements + indexes       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order, record each one                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bootstrap::seed_if_empty (not a migration: runs every startup)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 4. **NEVER** modify existing migrations - always add new ones
//!
//! ## Concurrent First Runs
//! The SQLite migrator takes no lock. Two processes opening the same fresh
//! file can both see a migration as pending; the loser of the race fails to
//! record the version (or finds the file locked). That failure is retried,
//! and the retry sees the version as applied.

use sqlx::migrate::MigrateError;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Attempts before a migration race is reported as a failure.
const MIGRATION_ATTEMPTS: u32 = 3;

/// Runs all pending database migrations.
///
/// Each migration runs in its own transaction, in filename order.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    let mut attempt = 1;
    loop {
        match MIGRATOR.run(pool).await {
            Ok(()) => break,
            Err(e) if attempt < MIGRATION_ATTEMPTS && lost_migration_race(&e) => {
                warn!(attempt, error = %e, "Migration raced another process, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!("All migrations applied successfully");
    Ok(())
}

/// True when another connection applied the same migration first.
fn lost_migration_race(err: &MigrateError) -> bool {
    let message = err.to_string();
    message.contains("_sqlx_migrations.version") || message.contains("database is locked")
}

/// Returns `(total_migrations, applied_migrations)` for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    // The bookkeeping table does not exist before the first run
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
