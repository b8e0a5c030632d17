//! # Validation Module
//!
//! Input rules checked before anything reaches the database.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form layer                                                   │
//! │  └── NumberParser turns typed text into numbers (never fails)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── quantity > 0, unit price >= 0                                     │
//! │  └── code / name present                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE(code), UNIQUE(barcode)                                     │
//! │  ├── CHECK(quantity > 0), CHECK(unit_price >= 0)                       │
//! │  └── FOREIGN KEY ... ON DELETE CASCADE                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{NewMovement, NewProduct, ProductPatch};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_CODE_LEN: usize = 64;
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code. Returns the trimmed code.
///
/// ## Example
/// ```rust
/// use stock_core::validation::validate_code;
///
/// assert_eq!(validate_code("  94319699 ").unwrap(), "94319699");
/// assert!(validate_code("").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<String> {
    required_text("code", code, MAX_CODE_LEN)
}

/// Validates a product name. Returns the trimmed name.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    required_text("name", name, MAX_NAME_LEN)
}

/// Normalizes an optional barcode: blank becomes `None`.
pub fn normalize_barcode(barcode: Option<&str>) -> Option<String> {
    barcode
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
}

fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a movement quantity.
///
/// ## Rules
/// - Must be strictly positive. Direction comes from the movement kind.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number >= 0. Zero is allowed.
///
/// ## Example
/// ```rust
/// use stock_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(1600.0).is_ok());
/// assert!(validate_unit_price(0.0).is_ok());
/// assert!(validate_unit_price(-0.01).is_err());
/// assert!(validate_unit_price(f64::NAN).is_err());
/// ```
pub fn validate_unit_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Write Model Validators
// =============================================================================

/// Validates and normalizes a product before insertion.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<NewProduct> {
    validate_unit_price(product.unit_price)?;

    Ok(NewProduct {
        code: validate_code(&product.code)?,
        name: validate_name(&product.name)?,
        unit_price: product.unit_price,
        stock: product.stock,
        barcode: normalize_barcode(product.barcode.as_deref()),
    })
}

/// Validates and normalizes the supplied fields of a patch.
pub fn validate_patch(patch: &ProductPatch) -> ValidationResult<ProductPatch> {
    if let Some(price) = patch.unit_price {
        validate_unit_price(price)?;
    }

    Ok(ProductPatch {
        code: patch.code.as_deref().map(validate_code).transpose()?,
        name: patch.name.as_deref().map(validate_name).transpose()?,
        unit_price: patch.unit_price,
        stock: patch.stock,
        barcode: patch
            .barcode
            .as_ref()
            .map(|b| normalize_barcode(b.as_deref())),
    })
}

/// Validates a movement before the ledger touches the database.
///
/// Blank notes are dropped.
pub fn validate_movement(movement: &NewMovement) -> ValidationResult<NewMovement> {
    validate_quantity(movement.quantity)?;
    if let Some(price) = movement.unit_price {
        validate_unit_price(price)?;
    }

    Ok(NewMovement {
        note: movement
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        ..movement.clone()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_code() {
        assert_eq!(validate_code("A1").unwrap(), "A1");
        assert_eq!(validate_code(" A1 ").unwrap(), "A1");
        assert!(validate_code("").is_err());
        assert!(validate_code("   ").is_err());
        assert!(validate_code(&"9".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Widget").is_ok());
        assert_eq!(
            validate_name(""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0.0).is_ok());
        assert!(validate_unit_price(10.0).is_ok());
        assert!(validate_unit_price(-1.0).is_err());
        assert!(validate_unit_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_normalize_barcode() {
        assert_eq!(normalize_barcode(None), None);
        assert_eq!(normalize_barcode(Some("  ")), None);
        assert_eq!(
            normalize_barcode(Some(" 7790001 ")),
            Some("7790001".to_string())
        );
    }

    #[test]
    fn test_validate_new_product_trims() {
        let product = NewProduct::new(" A1 ", " Widget ").barcode(" ");
        let clean = validate_new_product(&product).unwrap();
        assert_eq!(clean.code, "A1");
        assert_eq!(clean.name, "Widget");
        assert_eq!(clean.barcode, None);
    }

    #[test]
    fn test_validate_new_product_rejects_negative_price() {
        let product = NewProduct::new("A1", "Widget").unit_price(-5.0);
        assert!(validate_new_product(&product).is_err());
    }

    #[test]
    fn test_validate_movement() {
        use crate::types::MovementKind;

        let ok = NewMovement::new(1, MovementKind::In, 3).unit_price(10.0).note("  ");
        assert_eq!(validate_movement(&ok).unwrap().note, None);

        let zero = NewMovement::new(1, MovementKind::In, 0);
        assert!(validate_movement(&zero).is_err());

        let negative_price = NewMovement::new(1, MovementKind::Out, 1).unit_price(-0.5);
        assert_eq!(
            validate_movement(&negative_price),
            Err(ValidationError::MustBeNonNegative {
                field: "unit_price".to_string()
            })
        );

        let current_price = NewMovement::new(1, MovementKind::Out, 1);
        assert!(validate_movement(&current_price).is_ok());
    }

    #[test]
    fn test_validate_patch() {
        let patch = ProductPatch::new().name("  Gadget ").barcode(Some("".into()));
        let clean = validate_patch(&patch).unwrap();
        assert_eq!(clean.name.as_deref(), Some("Gadget"));
        assert_eq!(clean.barcode, Some(None));
        assert_eq!(clean.code, None);

        assert!(validate_patch(&ProductPatch::new().code("")).is_err());
        assert!(validate_patch(&ProductPatch::new().unit_price(-1.0)).is_err());
    }
}
