//! # Store Configuration
//!
//! Resolves where the inventory database lives on disk.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. STOCK_DB environment variable (non-blank)                          │
//! │  2. Windows: %LOCALAPPDATA%\OnceStock\inventario.db                    │
//! │  3. Elsewhere: ./inventario.db (current working directory)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is the only externally configurable setting of the store.

use std::path::PathBuf;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::pool::DbConfig;

/// Environment variable overriding the database file location.
pub const DB_PATH_ENV: &str = "STOCK_DB";

/// File name of the inventory database.
pub const DB_FILE_NAME: &str = "inventario.db";

/// Application folder under the platform's local data directory.
pub const APP_DIR_NAME: &str = "OnceStock";

/// Where the store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_path: PathBuf,
}

impl StoreConfig {
    /// Reads `STOCK_DB`, falling back to the platform default.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let store = StoreConfig::from_env()?;
    /// let db = Database::new(store.db_config()).await?;
    /// ```
    pub fn from_env() -> DbResult<Self> {
        let database_path = resolve_database_path(std::env::var(DB_PATH_ENV).ok())?;
        debug!(path = %database_path.display(), "Resolved database path");
        Ok(StoreConfig { database_path })
    }

    /// Pool configuration pointing at this store's database file.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
    }
}

/// Picks the database path from an optional override.
///
/// A blank override counts as unset.
pub fn resolve_database_path(override_path: Option<String>) -> DbResult<PathBuf> {
    match override_path {
        Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path.trim())),
        _ => default_database_path(),
    }
}

#[cfg(windows)]
fn default_database_path() -> DbResult<PathBuf> {
    use directories::BaseDirs;

    let base = BaseDirs::new()
        .ok_or_else(|| DbError::Config("could not determine local app data directory".into()))?;
    let dir = base.data_local_dir().join(APP_DIR_NAME);

    std::fs::create_dir_all(&dir)
        .map_err(|e| DbError::Config(format!("cannot create {}: {e}", dir.display())))?;

    Ok(dir.join(DB_FILE_NAME))
}

#[cfg(not(windows))]
fn default_database_path() -> DbResult<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|e| DbError::Config(format!("cannot read current directory: {e}")))?;
    Ok(cwd.join(DB_FILE_NAME))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let path = resolve_database_path(Some("/data/shop.db".to_string())).unwrap();
        assert_eq!(path, PathBuf::from("/data/shop.db"));
    }

    #[test]
    fn test_override_is_trimmed() {
        let path = resolve_database_path(Some("  /data/shop.db \n".to_string())).unwrap();
        assert_eq!(path, PathBuf::from("/data/shop.db"));
    }

    #[test]
    fn test_blank_override_uses_default() {
        let path = resolve_database_path(Some("   ".to_string())).unwrap();
        assert!(path.ends_with(DB_FILE_NAME));
        assert_eq!(path, resolve_database_path(None).unwrap());
    }

    #[test]
    fn test_db_config_uses_path() {
        let store = StoreConfig {
            database_path: PathBuf::from("/data/shop.db"),
        };
        assert_eq!(store.db_config().database_path, PathBuf::from("/data/shop.db"));
    }
}
