//! # Movement Repository
//!
//! Append-only movement log. Rows are written only by the stock ledger,
//! inside its transaction, and are never edited or deleted individually
//! (deleting a product cascades its history).

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use stock_core::{Movement, MovementView, NewMovement, DEFAULT_MOVEMENT_LIMIT};
use tracing::debug;

use crate::error::DbResult;

/// Repository for the movement history.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    pool: SqlitePool,
}

impl MovementRepository {
    /// Creates a new MovementRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MovementRepository { pool }
    }

    /// Lists movements joined with their product's code and name, newest
    /// first.
    ///
    /// ## Arguments
    /// * `product_id` - Restrict to one product, or `None` for all
    /// * `limit` - Maximum rows, see [`DEFAULT_MOVEMENT_LIMIT`]
    pub async fn list(&self, product_id: Option<i64>, limit: u32) -> DbResult<Vec<MovementView>> {
        debug!(?product_id, limit, "Listing movements");

        let movements = sqlx::query_as::<_, MovementView>(
            r#"
            SELECT
                m.id,
                m.product_id,
                p.code AS product_code,
                p.name AS product_name,
                m.kind,
                m.quantity,
                m.unit_price,
                m.note,
                m.created_at
            FROM movements m
            INNER JOIN products p ON p.id = m.product_id
            WHERE (?1 IS NULL OR m.product_id = ?1)
            ORDER BY m.id DESC
            LIMIT ?2
            "#,
        )
        .bind(product_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }

    /// [`list`](Self::list) with the default limit.
    pub async fn recent(&self, product_id: Option<i64>) -> DbResult<Vec<MovementView>> {
        self.list(product_id, DEFAULT_MOVEMENT_LIMIT).await
    }

    /// Counts the movements of one product.
    pub async fn count_for(&self, product_id: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movements WHERE product_id = ?1")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Appends a movement on an open connection.
    ///
    /// A `None` unit price snapshots the product's current price. The insert
    /// selects from `products`, so it writes nothing and returns `None` when
    /// the product does not exist.
    pub(crate) async fn insert(
        conn: &mut SqliteConnection,
        movement: &NewMovement,
        now: DateTime<Utc>,
    ) -> DbResult<Option<Movement>> {
        let inserted = sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movements (product_id, kind, quantity, unit_price, note, created_at)
            SELECT id, ?1, ?2, COALESCE(?3, price), ?4, ?5
            FROM products
            WHERE id = ?6
            RETURNING id, product_id, kind, quantity, unit_price, note, created_at
            "#,
        )
        .bind(movement.kind)
        .bind(movement.quantity)
        .bind(movement.unit_price)
        .bind(&movement.note)
        .bind(now)
        .bind(movement.product_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(inserted)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
