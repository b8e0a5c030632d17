//! # Stock Ledger
//!
//! The only way stock changes through movements: record the movement and
//! adjust the product's count as one atomic unit.
//!
//! ## Movement Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    apply_movement(A1, OUT, 4, 10.0)                     │
//! │                                                                         │
//! │  validate: quantity > 0, unit_price >= 0      ── fail → no write       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  ├── INSERT INTO movements ... SELECT FROM products WHERE id = ?       │
//! │  │        0 rows → UnknownProduct, ROLLBACK                             │
//! │  ├── UPDATE products SET stock = stock + (-4), updated_at = now        │
//! │  │        [RejectNegative, OUT: ... AND stock + (-4) >= 0]             │
//! │  │        0 rows → InsufficientStock, ROLLBACK                          │
//! │  └── SELECT product                                                     │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  The count is adjusted relative to itself, never read-then-written,    │
//! │  so two concurrent scans of the same product both land.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first statement of the transaction is a write, so SQLite takes the
//! write lock up front and concurrent ledgers queue on the busy timeout.

use chrono::Utc;
use sqlx::{Connection, SqliteConnection, SqlitePool};
use stock_core::validation::validate_movement;
use stock_core::{
    CoreError, MovementKind, NewMovement, Product, StockPolicy, ValidationError,
    SCAN_MOVEMENT_NOTE,
};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::movement::MovementRepository;
use crate::repository::product::PRODUCT_COLUMNS;

/// Applies movements to products atomically.
///
/// ## Usage
/// ```rust,ignore
/// let ledger = db.ledger();
///
/// ledger.apply_movement(widget.id, MovementKind::In, 3, 10.0, None).await?;
/// let widget = ledger.apply_movement(widget.id, MovementKind::Out, 4, 10.0, None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StockLedger {
    pool: SqlitePool,
    policy: StockPolicy,
}

impl StockLedger {
    /// Creates a ledger with the permissive [`StockPolicy::AllowNegative`].
    pub fn new(pool: SqlitePool) -> Self {
        StockLedger {
            pool,
            policy: StockPolicy::default(),
        }
    }

    /// Sets the negative-stock policy.
    pub fn with_policy(mut self, policy: StockPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the negative-stock policy in effect.
    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// Records a movement at an explicit unit price and adjusts stock.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product after the adjustment
    /// * `Err(DbError::Core(Validation))` - bad quantity/price or unknown
    ///   product; nothing was written
    /// * `Err(DbError::Core(InsufficientStock))` - only under
    ///   [`StockPolicy::RejectNegative`]; nothing was written
    pub async fn apply_movement(
        &self,
        product_id: i64,
        kind: MovementKind,
        quantity: i64,
        unit_price: f64,
        note: Option<&str>,
    ) -> DbResult<Product> {
        let mut movement = NewMovement::new(product_id, kind, quantity).unit_price(unit_price);
        movement.note = note.map(str::to_string);
        self.record(&movement).await
    }

    /// Records a movement priced at the product's current unit price.
    ///
    /// The price is read inside the same transaction as the insert.
    pub async fn apply_at_current_price(
        &self,
        product_id: i64,
        kind: MovementKind,
        quantity: i64,
        note: Option<&str>,
    ) -> DbResult<Product> {
        let mut movement = NewMovement::new(product_id, kind, quantity);
        movement.note = note.map(str::to_string);
        self.record(&movement).await
    }

    /// Records a movement coming from the scan input, at the current price.
    pub async fn apply_scan(
        &self,
        product_id: i64,
        kind: MovementKind,
        quantity: i64,
    ) -> DbResult<Product> {
        self.apply_at_current_price(product_id, kind, quantity, Some(SCAN_MOVEMENT_NOTE))
            .await
    }

    /// Records a movement on a pooled connection.
    pub async fn record(&self, movement: &NewMovement) -> DbResult<Product> {
        // Validate before touching the pool
        let movement = validate_movement(movement)?;

        let mut conn = self.pool.acquire().await?;
        self.apply_in(&mut conn, &movement).await
    }

    /// Records a movement on a caller-supplied connection.
    ///
    /// Runs in its own transaction, or in a savepoint when `conn` is already
    /// inside one, so a failure never leaves a movement without its stock
    /// adjustment.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let mut tx = db.pool().begin().await?;
    /// ledger.apply_in(&mut tx, &NewMovement::new(a, MovementKind::Out, 1)).await?;
    /// ledger.apply_in(&mut tx, &NewMovement::new(b, MovementKind::In, 1)).await?;
    /// tx.commit().await?;
    /// ```
    pub async fn apply_in(
        &self,
        conn: &mut SqliteConnection,
        movement: &NewMovement,
    ) -> DbResult<Product> {
        let movement = validate_movement(movement)?;
        let delta = movement.kind.signed(movement.quantity);
        let now = Utc::now();

        debug!(
            product_id = movement.product_id,
            kind = %movement.kind,
            quantity = movement.quantity,
            "Applying movement"
        );

        let mut tx = conn.begin().await?;

        let Some(recorded) = MovementRepository::insert(&mut tx, &movement, now).await? else {
            tx.rollback().await?;
            return Err(ValidationError::UnknownProduct(movement.product_id).into());
        };

        let adjust_sql = match self.policy {
            StockPolicy::AllowNegative => {
                "UPDATE products SET stock = stock + ?1, updated_at = ?2 WHERE id = ?3"
            }
            StockPolicy::RejectNegative => {
                "UPDATE products SET stock = stock + ?1, updated_at = ?2 \
                 WHERE id = ?3 AND (?1 >= 0 OR stock + ?1 >= 0)"
            }
        };

        let adjusted = sqlx::query(adjust_sql)
            .bind(delta)
            .bind(now)
            .bind(movement.product_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let product_sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&product_sql)
            .bind(movement.product_id)
            .fetch_one(&mut *tx)
            .await?;

        if adjusted == 0 {
            tx.rollback().await?;
            warn!(
                code = %product.code,
                available = product.stock,
                requested = movement.quantity,
                "Withdrawal rejected: insufficient stock"
            );
            return Err(DbError::Core(CoreError::InsufficientStock {
                code: product.code,
                available: product.stock,
                requested: movement.quantity,
            }));
        }

        tx.commit().await?;

        info!(
            movement_id = recorded.id,
            code = %product.code,
            kind = %recorded.kind,
            quantity = recorded.quantity,
            stock = product.stock,
            "Movement applied"
        );

        Ok(product)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
