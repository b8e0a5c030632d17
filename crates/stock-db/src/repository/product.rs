//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Substring search over code and name, ordered by name
//! - CRUD with uniqueness errors naming the conflicting field
//! - Scan lookup: code first, then barcode
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      How Catalog Search Works                           │
//! │                                                                         │
//! │  User types: "wid"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lowercase(code) or lowercase(name) contains "wid"                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ A1       | Widget        | 10.00 | 4   │ ← MATCH (name)            │
//! │  │ WID-200  | Bolt          |  0.50 | 90  │ ← MATCH (code)            │
//! │  │ 94319699 | billy         |  1600 | 40  │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sort by lowercase(name), then id  →  [Bolt, Widget]                   │
//! │                                                                         │
//! │  Folding is Unicode-aware; the filter has no wildcards.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use stock_core::validation::{validate_new_product, validate_patch};
use stock_core::{NewProduct, Product, ProductPatch};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Column list matching [`Product`]'s fields.
pub(crate) const PRODUCT_COLUMNS: &str =
    "id, code, name, price AS unit_price, stock, barcode, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let all = repo.list("").await?;
/// let widget = repo.get_by_code("A1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products whose code or name contains `filter`, ignoring case.
    ///
    /// An empty (or blank) filter returns the whole catalog. Results are
    /// ordered by name, case-insensitively, then by id.
    ///
    /// Matching uses Unicode lowercase (`Ñ`/`ñ`, `É`/`é`), which SQLite's
    /// `LIKE` and `NOCASE` do not fold, so it runs over the fetched rows.
    pub async fn list(&self, filter: &str) -> DbResult<Vec<Product>> {
        let needle = filter.trim().to_lowercase();

        debug!(filter = %needle, "Listing products");

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");

        let mut products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        if !needle.is_empty() {
            products.retain(|p| matches_filter(p, &needle));
        }
        products.sort_by_cached_key(|p| p.name.to_lowercase());

        debug!(count = products.len(), "Listing returned products");
        Ok(products)
    }

    /// Creates a product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with its assigned id
    /// * `Err(DbError::UniqueViolation)` - code or barcode already exists
    /// * `Err(DbError::Core)` - blank code/name or negative price
    pub async fn create(&self, product: &NewProduct) -> DbResult<Product> {
        let product = validate_new_product(product)?;
        let now = Utc::now();

        debug!(code = %product.code, "Inserting product");

        let sql = format!(
            r"
            INSERT INTO products (code, name, price, stock, barcode, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING {PRODUCT_COLUMNS}
            "
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(&product.code)
            .bind(&product.name)
            .bind(product.unit_price)
            .bind(product.stock)
            .bind(&product.barcode)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict(e, Some(&product.code), product.barcode.as_deref()))
    }

    /// Gets a product by its id. `None` when absent.
    pub async fn get(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its code. `None` when absent.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE code = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(code.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its barcode. `None` when absent.
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(barcode.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Resolves scanner input: by code first, then by barcode.
    pub async fn find_for_scan(&self, input: &str) -> DbResult<Option<Product>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        if let Some(product) = self.get_by_code(input).await? {
            return Ok(Some(product));
        }

        debug!(input = %input, "No code match, trying barcode");
        self.get_by_barcode(input).await
    }

    /// Updates only the fields present in `patch`, plus `updated_at`.
    ///
    /// An empty patch changes nothing (not even `updated_at`).
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - The product after the update
    /// * `Ok(None)` - No product with this id
    /// * `Err(DbError::UniqueViolation)` - new code or barcode is taken
    ///
    /// ## Stock Override
    /// `patch.stock` overwrites the count without recording a movement.
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> DbResult<Option<Product>> {
        if patch.is_empty() {
            debug!(id, "Empty patch, nothing to update");
            return self.get(id).await;
        }

        let patch = validate_patch(patch)?;
        let now = Utc::now();

        debug!(id, "Updating product");

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE products SET ");
        let mut fields = query.separated(", ");

        if let Some(code) = &patch.code {
            fields.push("code = ").push_bind_unseparated(code.clone());
        }
        if let Some(name) = &patch.name {
            fields.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(price) = patch.unit_price {
            fields.push("price = ").push_bind_unseparated(price);
        }
        if let Some(stock) = patch.stock {
            fields.push("stock = ").push_bind_unseparated(stock);
        }
        if let Some(barcode) = &patch.barcode {
            fields.push("barcode = ").push_bind_unseparated(barcode.clone());
        }
        fields.push("updated_at = ").push_bind_unseparated(now);

        query
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(PRODUCT_COLUMNS);

        query
            .build_query_as::<Product>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                conflict(
                    e,
                    patch.code.as_deref(),
                    patch.barcode.as_ref().and_then(|b| b.as_deref()),
                )
            })
    }

    /// Deletes a product and, by cascade, its whole movement history.
    ///
    /// Returns `false` when no product had this id.
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// `needle` must already be lowercase.
fn matches_filter(product: &Product, needle: &str) -> bool {
    product.code.to_lowercase().contains(needle) || product.name.to_lowercase().contains(needle)
}

/// Maps an insert/update error, filling in the value of a unique conflict
/// from what the caller tried to write.
fn conflict(err: sqlx::Error, code: Option<&str>, barcode: Option<&str>) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { field, value } => {
            let supplied = match field.as_str() {
                "code" => code,
                "barcode" => barcode,
                _ => None,
            };
            let value = supplied.map(str::to_string).unwrap_or(value);
            DbError::duplicate(field, value)
        }
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stock_core::{CoreError, ValidationError};

    async fn empty_db() -> Database {
        Database::new(DbConfig::in_memory().seed_catalog(false))
            .await
            .unwrap()
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = empty_db().await;
        let repo = db.products();

        let created = repo
            .create(&NewProduct::new("A1", "Widget").unit_price(10.0).stock(5))
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.code, "A1");
        assert_eq!(created.unit_price, 10.0);
        assert_eq!(created.stock, 5);
        assert_eq!(created.created_at, created.updated_at);

        assert_eq!(repo.get(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(repo.get_by_code("A1").await.unwrap(), Some(created));
        assert_eq!(repo.get(9999).await.unwrap(), None);
        assert_eq!(repo.get_by_code("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_code_is_rejected() {
        let db = empty_db().await;
        let repo = db.products();

        let first = repo
            .create(&NewProduct::new("A1", "Widget").stock(5))
            .await
            .unwrap();

        let err = repo
            .create(&NewProduct::new("A1", "Other").stock(99))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "code");
                assert_eq!(value, "A1");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.get(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_duplicate_barcode_is_rejected() {
        let db = empty_db().await;
        let repo = db.products();

        repo.create(&NewProduct::new("A1", "Widget").barcode("7790001"))
            .await
            .unwrap();

        let err = repo
            .create(&NewProduct::new("B2", "Gadget").barcode("7790001"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, ref value } if field == "barcode" && value == "7790001"
        ));
    }

    #[tokio::test]
    async fn test_products_without_barcode_do_not_conflict() {
        let db = empty_db().await;
        let repo = db.products();

        repo.create(&NewProduct::new("A1", "Widget")).await.unwrap();
        repo.create(&NewProduct::new("B2", "Gadget").barcode("  "))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_requires_code_and_name() {
        let db = empty_db().await;
        let repo = db.products();

        let err = repo.create(&NewProduct::new(" ", "Widget")).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));

        let err = repo
            .create(&NewProduct::new("A1", "Widget").unit_price(-1.0))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_orders_by_name_ignoring_case() {
        let db = empty_db().await;
        let repo = db.products();

        for (code, name) in [("3", "zeta"), ("1", "Alpha"), ("2", "beta"), ("4", "Gamma")] {
            repo.create(&NewProduct::new(code, name)).await.unwrap();
        }

        let all = repo.list("").await.unwrap();
        assert_eq!(names(&all), vec!["Alpha", "beta", "Gamma", "zeta"]);
        assert_eq!(repo.list("   ").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_list_matches_code_or_name() {
        let db = empty_db().await;
        let repo = db.products();

        repo.create(&NewProduct::new("A1", "Widget")).await.unwrap();
        repo.create(&NewProduct::new("WID-200", "Bolt")).await.unwrap();
        repo.create(&NewProduct::new("X9", "Hammer")).await.unwrap();

        let found = repo.list("wid").await.unwrap();
        assert_eq!(names(&found), vec!["Bolt", "Widget"]);

        let found = repo.list("A1").await.unwrap();
        assert_eq!(names(&found), vec!["Widget"]);

        assert!(repo.list("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_treats_wildcards_literally() {
        let db = empty_db().await;
        let repo = db.products();

        repo.create(&NewProduct::new("P1", "Promo 50%")).await.unwrap();
        repo.create(&NewProduct::new("P2", "Promo 500")).await.unwrap();
        repo.create(&NewProduct::new("P3", "a_b")).await.unwrap();
        repo.create(&NewProduct::new("P4", "axb")).await.unwrap();

        assert_eq!(names(&repo.list("50%").await.unwrap()), vec!["Promo 50%"]);
        assert_eq!(names(&repo.list("a_b").await.unwrap()), vec!["a_b"]);
    }

    #[tokio::test]
    async fn test_list_folds_accented_letters() {
        let db = empty_db().await;
        let repo = db.products();

        repo.create(&NewProduct::new("P1", "ÑOQUIS CASEROS")).await.unwrap();
        repo.create(&NewProduct::new("P2", "Café molido")).await.unwrap();
        repo.create(&NewProduct::new("ÁGUA-1", "Agua")).await.unwrap();

        assert_eq!(names(&repo.list("ñoquis").await.unwrap()), vec!["ÑOQUIS CASEROS"]);
        assert_eq!(names(&repo.list("CAFÉ").await.unwrap()), vec!["Café molido"]);
        assert_eq!(names(&repo.list("água").await.unwrap()), vec!["Agua"]);
    }

    #[tokio::test]
    async fn test_list_orders_accented_names_ignoring_case() {
        let db = empty_db().await;
        let repo = db.products();

        for (code, name) in [("1", "éclair"), ("2", "Éxito"), ("3", "Ébano")] {
            repo.create(&NewProduct::new(code, name)).await.unwrap();
        }

        let all = repo.list("").await.unwrap();
        assert_eq!(names(&all), vec!["Ébano", "éclair", "Éxito"]);
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let db = empty_db().await;
        let repo = db.products();

        let widget = repo
            .create(&NewProduct::new("A1", "Widget").unit_price(10.0).stock(5))
            .await
            .unwrap();

        let updated = repo
            .update(widget.id, &ProductPatch::new().unit_price(12.5))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.unit_price, 12.5);
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.code, "A1");
        assert_eq!(updated.stock, 5);
        assert!(updated.updated_at >= widget.updated_at);
        assert_eq!(updated.created_at, widget.created_at);
    }

    #[tokio::test]
    async fn test_update_barcode_set_and_clear() {
        let db = empty_db().await;
        let repo = db.products();

        let widget = repo.create(&NewProduct::new("A1", "Widget")).await.unwrap();

        let with_barcode = repo
            .update(widget.id, &ProductPatch::new().barcode(Some("7790001".into())))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(with_barcode.barcode.as_deref(), Some("7790001"));

        let cleared = repo
            .update(widget.id, &ProductPatch::new().barcode(None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.barcode, None);
    }

    #[tokio::test]
    async fn test_empty_patch_is_noop() {
        let db = empty_db().await;
        let repo = db.products();

        let widget = repo.create(&NewProduct::new("A1", "Widget")).await.unwrap();
        let same = repo
            .update(widget.id, &ProductPatch::new())
            .await
            .unwrap();

        assert_eq!(same, Some(widget));
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let db = empty_db().await;
        let result = db
            .products()
            .update(42, &ProductPatch::new().name("Ghost"))
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_update_to_taken_code() {
        let db = empty_db().await;
        let repo = db.products();

        repo.create(&NewProduct::new("A1", "Widget")).await.unwrap();
        let gadget = repo.create(&NewProduct::new("B2", "Gadget")).await.unwrap();

        let err = repo
            .update(gadget.id, &ProductPatch::new().code("A1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, ref value } if field == "code" && value == "A1"
        ));
        assert_eq!(repo.get(gadget.id).await.unwrap().unwrap().code, "B2");
    }

    #[tokio::test]
    async fn test_find_for_scan_prefers_code() {
        let db = empty_db().await;
        let repo = db.products();

        let by_code = repo.create(&NewProduct::new("123", "By code")).await.unwrap();
        let by_barcode = repo
            .create(&NewProduct::new("B2", "By barcode").barcode("7790001"))
            .await
            .unwrap();
        repo.create(&NewProduct::new("C3", "Shadowed").barcode("123"))
            .await
            .unwrap();

        assert_eq!(repo.find_for_scan(" 123 ").await.unwrap(), Some(by_code));
        assert_eq!(repo.find_for_scan("7790001").await.unwrap(), Some(by_barcode));
        assert_eq!(repo.find_for_scan("000").await.unwrap(), None);
        assert_eq!(repo.find_for_scan("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = empty_db().await;
        let repo = db.products();

        let widget = repo.create(&NewProduct::new("A1", "Widget")).await.unwrap();

        assert!(repo.delete(widget.id).await.unwrap());
        assert!(!repo.delete(widget.id).await.unwrap());
        assert_eq!(repo.get(widget.id).await.unwrap(), None);
        assert!(repo.list("").await.unwrap().is_empty());
    }
}
