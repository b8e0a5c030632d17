//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Movement     │   │  MovementKind   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (rowid)     │◄──│  product_id     │   │  IN  (+qty)     │       │
//! │  │  code (unique)  │   │  kind           │   │  OUT (-qty)     │       │
//! │  │  name           │   │  quantity > 0   │   └─────────────────┘       │
//! │  │  unit_price     │   │  unit_price ≥ 0 │                              │
//! │  │  stock          │   │  note           │                              │
//! │  │  barcode?       │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ledger Invariant
//! `Product.stock` always equals the initial stock plus the signed sum of the
//! product's movements. The database layer maintains it by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry with its on-hand quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Surrogate identity, assigned by the database.
    pub id: i64,

    /// External identifier used by search and the scan input. Unique.
    pub code: String,

    /// Display name. Searched case-insensitively, not unique.
    pub name: String,

    /// Current unit price. Never negative.
    pub unit_price: f64,

    /// On-hand quantity. May go negative under the permissive stock policy.
    pub stock: i64,

    /// Optional barcode, unique when present.
    pub barcode: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Refreshed on every field edit and every applied movement.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Movement Kind
// =============================================================================

/// Direction of a stock movement. Closed set: no other values exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
    /// Receipt: increases stock.
    In,
    /// Withdrawal: decreases stock.
    Out,
}

impl MovementKind {
    /// Returns the stored representation (`"IN"` / `"OUT"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            MovementKind::In => "IN",
            MovementKind::Out => "OUT",
        }
    }

    /// Returns the stock delta this kind produces for `quantity`.
    ///
    /// ## Example
    /// ```rust
    /// use stock_core::MovementKind;
    ///
    /// assert_eq!(MovementKind::In.signed(3), 3);
    /// assert_eq!(MovementKind::Out.signed(3), -3);
    /// ```
    #[inline]
    pub const fn signed(&self, quantity: i64) -> i64 {
        match self {
            MovementKind::In => quantity,
            MovementKind::Out => -quantity,
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Movement
// =============================================================================

/// An immutable record of a stock change.
///
/// `unit_price` is a snapshot taken when the movement was recorded; later
/// price edits on the product do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: i64,
    pub product_id: i64,
    pub kind: MovementKind,
    pub quantity: i64,
    pub unit_price: f64,
    pub note: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Movement {
    /// Signed stock delta of this movement.
    #[inline]
    pub fn delta(&self) -> i64 {
        self.kind.signed(self.quantity)
    }
}

/// A movement joined with the code and name of its product, for history views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MovementView {
    pub id: i64,
    pub product_id: i64,
    pub product_code: String,
    pub product_name: String,
    pub kind: MovementKind,
    pub quantity: i64,
    pub unit_price: f64,
    pub note: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl MovementView {
    /// Signed stock delta of this movement.
    #[inline]
    pub fn delta(&self) -> i64 {
        self.kind.signed(self.quantity)
    }
}

/// Sums the signed quantities of a movement history.
///
/// Used to check the ledger invariant: `stock == initial + net_change(history)`.
pub fn net_change<'a, I>(movements: I) -> i64
where
    I: IntoIterator<Item = &'a MovementView>,
{
    movements.into_iter().map(MovementView::delta).sum()
}

// =============================================================================
// Write Models
// =============================================================================

/// Fields for creating a product.
///
/// ## Example
/// ```rust
/// use stock_core::NewProduct;
///
/// let widget = NewProduct::new("A1", "Widget").unit_price(10.0).stock(5);
/// assert_eq!(widget.stock, 5);
/// assert!(widget.barcode.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub barcode: Option<String>,
}

impl NewProduct {
    /// Creates an empty product (price 0, stock 0, no barcode).
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        NewProduct {
            code: code.into(),
            name: name.into(),
            unit_price: 0.0,
            stock: 0,
            barcode: None,
        }
    }

    /// Sets the unit price.
    pub fn unit_price(mut self, price: f64) -> Self {
        self.unit_price = price;
        self
    }

    /// Sets the initial stock.
    pub fn stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Sets the barcode.
    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }
}

/// A movement to record through the stock ledger.
///
/// `unit_price: None` snapshots the product's current price at the moment
/// the movement is written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovement {
    pub product_id: i64,
    pub kind: MovementKind,
    pub quantity: i64,
    pub unit_price: Option<f64>,
    pub note: Option<String>,
}

impl NewMovement {
    pub fn new(product_id: i64, kind: MovementKind, quantity: i64) -> Self {
        NewMovement {
            product_id,
            kind,
            quantity,
            unit_price: None,
            note: None,
        }
    }

    pub fn unit_price(mut self, price: f64) -> Self {
        self.unit_price = Some(price);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

// =============================================================================
// Stock Policy
// =============================================================================

/// Whether an `OUT` movement may take stock below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Historical behaviour: withdrawals are never refused for lack of stock.
    #[default]
    AllowNegative,
    /// Refuse a withdrawal that would leave stock below zero.
    RejectNegative,
}

/// A partial product update. Only `Some` fields are written.
///
/// `barcode` is doubly optional: `Some(None)` clears the barcode, `None`
/// leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub unit_price: Option<f64>,
    pub stock: Option<i64>,
    pub barcode: Option<Option<String>>,
}

impl ProductPatch {
    pub fn new() -> Self {
        ProductPatch::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn unit_price(mut self, price: f64) -> Self {
        self.unit_price = Some(price);
        self
    }

    /// Overrides the stock count directly. This bypasses the movement log.
    pub fn stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn barcode(mut self, barcode: Option<String>) -> Self {
        self.barcode = Some(barcode);
        self
    }

    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.unit_price.is_none()
            && self.stock.is_none()
            && self.barcode.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn view(kind: MovementKind, quantity: i64) -> MovementView {
        MovementView {
            id: 1,
            product_id: 1,
            product_code: "A1".to_string(),
            product_name: "Widget".to_string(),
            kind,
            quantity,
            unit_price: 10.0,
            note: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_kind_signed() {
        assert_eq!(MovementKind::In.signed(7), 7);
        assert_eq!(MovementKind::Out.signed(7), -7);
    }

    #[test]
    fn test_kind_display_matches_storage() {
        assert_eq!(MovementKind::In.to_string(), "IN");
        assert_eq!(MovementKind::Out.to_string(), "OUT");
    }

    #[test]
    fn test_net_change() {
        let history = vec![
            view(MovementKind::In, 3),
            view(MovementKind::Out, 4),
            view(MovementKind::In, 10),
        ];
        assert_eq!(net_change(&history), 9);
        assert_eq!(net_change(&Vec::new()), 0);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProductPatch::new().is_empty());
        assert!(!ProductPatch::new().name("Gadget").is_empty());
        assert!(!ProductPatch::new().barcode(None).is_empty());
    }

    #[test]
    fn test_stock_policy_default_is_permissive() {
        assert_eq!(StockPolicy::default(), StockPolicy::AllowNegative);
    }

    #[test]
    fn test_new_movement_builder() {
        let m = NewMovement::new(1, MovementKind::Out, 4).unit_price(10.0).note("scan");
        assert_eq!(m.unit_price, Some(10.0));
        assert_eq!(m.note.as_deref(), Some("scan"));
        assert_eq!(NewMovement::new(1, MovementKind::In, 1).unit_price, None);
    }

    #[test]
    fn test_new_product_defaults() {
        let p = NewProduct::new("A1", "Widget");
        assert_eq!(p.unit_price, 0.0);
        assert_eq!(p.stock, 0);
        assert_eq!(p.barcode, None);
    }
}
