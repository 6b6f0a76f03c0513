//! # Product Repository
//!
//! Catalog operations: create, fetch, partial update, delete, list.
//!
//! ## Partial Update Semantics
//! `update` validates only the fields the caller actually supplied, each
//! independently; omitted fields keep their stored value. (The historical
//! behavior of requiring every field on partial updates was a quirk, not a
//! rule - corrected here deliberately.)
//!
//! ## Delete Semantics
//! Referential integrity is enforced at the store boundary: deleting a
//! product that stock entries or sale items still reference fails with
//! `ForeignKeyViolation` rather than orphaning rows.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use balcao_core::validation::{validate_description, validate_name, validate_price_cents};
use balcao_core::Product;

/// Repository for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Creates a product.
    ///
    /// ## Errors
    /// `Validation` if name or description is empty or price is not positive.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        price_cents: i64,
    ) -> DbResult<Product> {
        validate_name(name)?;
        validate_description(description)?;
        validate_price_cents(price_cents)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            price_cents,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by id.
    ///
    /// ## Errors
    /// `NotFound` when no product has that id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Lists all products in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, created_at, updated_at
            FROM products
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Updates a product. Only supplied fields change; each supplied field
    /// is validated on its own.
    ///
    /// ## Errors
    /// `NotFound` when the id is absent; `Validation` when a supplied field
    /// is invalid.
    pub async fn update(
        &self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
        price_cents: Option<i64>,
    ) -> DbResult<Product> {
        if let Some(name) = name {
            validate_name(name)?;
        }
        if let Some(description) = description {
            validate_description(description)?;
        }
        if let Some(price_cents) = price_cents {
            validate_price_cents(price_cents)?;
        }

        let mut product = self.get_by_id(id).await?;

        if let Some(name) = name {
            product.name = name.trim().to_string();
        }
        if let Some(description) = description {
            product.description = description.trim().to_string();
        }
        if let Some(price_cents) = price_cents {
            product.price_cents = price_cents;
        }
        product.updated_at = Utc::now();

        debug!(id = %product.id, "updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(product)
    }

    /// Deletes a product by id.
    ///
    /// ## Errors
    /// `NotFound` when absent; `ForeignKeyViolation` when stock entries or
    /// sale items still reference it.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Best-effort bulk clear. Failures are logged, never raised - this is a
    /// maintenance utility, not part of the transactional path.
    pub async fn delete_all(&self) {
        if let Err(err) = sqlx::query("DELETE FROM products").execute(&self.pool).await {
            error!(error = %err, "failed to clear products");
        }
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;
    use balcao_core::ValidationError;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.create("Bolo", "Chocolate cake 500g", 5000).await.unwrap();
        let fetched = repo.get_by_id(&created.id).await.unwrap();

        assert_eq!(fetched.name, "Bolo");
        assert_eq!(fetched.description, "Chocolate cake 500g");
        assert_eq!(fetched.price_cents, 5000);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let db = test_db().await;
        let repo = db.products();

        let err = repo.create("", "desc", 100).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::Required { .. })
        ));

        let err = repo.create("name", "", 100).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = repo.create("name", "desc", 0).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let db = test_db().await;

        let err = db.products().get_by_id("no-such-id").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_partial_update_touches_only_supplied_fields() {
        let db = test_db().await;
        let repo = db.products();

        let product = repo.create("Bolo", "Chocolate cake", 5000).await.unwrap();

        // Only the price changes; name and description stay as stored.
        let updated = repo.update(&product.id, None, None, Some(6000)).await.unwrap();
        assert_eq!(updated.name, "Bolo");
        assert_eq!(updated.description, "Chocolate cake");
        assert_eq!(updated.price_cents, 6000);

        // A supplied-but-invalid field still fails.
        let err = repo.update(&product.id, Some(""), None, None).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = test_db().await;

        let err = db
            .products()
            .update("ghost", Some("name"), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = test_db().await;

        let err = db.products().delete("ghost").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_referenced_product_is_rejected() {
        let db = test_db().await;

        let product = db.products().create("Bolo", "cake", 5000).await.unwrap();
        db.storage().create_entry(&product.id, 3, 1000).await.unwrap();

        let err = db.products().delete(&product.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let db = test_db().await;
        let repo = db.products();

        repo.create("First", "a", 100).await.unwrap();
        repo.create("Second", "b", 200).await.unwrap();
        repo.create("Third", "c", 300).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_delete_all_never_raises() {
        let db = test_db().await;
        let repo = db.products();

        repo.create("Bolo", "cake", 5000).await.unwrap();
        repo.delete_all().await;

        assert_eq!(repo.count().await.unwrap(), 0);

        // Clearing an already-empty table is fine too.
        repo.delete_all().await;
    }

    #[tokio::test]
    async fn test_delete_all_swallows_store_errors() {
        let db = test_db().await;

        // A referenced product makes the bulk delete fail on the FK; the
        // failure is logged and swallowed, and the rows stay put.
        let product = db.products().create("Bolo", "cake", 5000).await.unwrap();
        db.storage().create_entry(&product.id, 3, 1000).await.unwrap();

        db.products().delete_all().await;

        assert_eq!(db.products().count().await.unwrap(), 1);
    }
}
