//! # Sale Repository
//!
//! Database operations for sale headers and their line items.
//!
//! ## Atomic Sale Creation
//! ```text
//! create_sale(total, lines)
//!      │
//!      ▼
//! BEGIN ── INSERT sale ── INSERT item ── INSERT item ── COMMIT
//!               │              │              │
//!               └──────────────┴──────────────┘
//!                 any failure → ROLLBACK, SaleCreation(cause)
//!                 (no sale row, no item rows survive)
//! ```
//!
//! The recorder never touches stock. Stock validation and the single
//! authoritative decrement happen in the checkout workflow, inside the same
//! transaction as these inserts (see [`crate::checkout`]).

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use balcao_core::validation::{validate_quantity, validate_sale_lines, validate_total_cents};
use balcao_core::{Sale, SaleItem, SaleLine};

/// Repository for sale and line-item operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Persists a sale header and one item per line, atomically.
    ///
    /// ## Errors
    /// `Validation` for a non-positive total or bad lines (checked before the
    /// transaction opens); `SaleCreation` wrapping the underlying cause for
    /// any failure during persistence - the whole transaction rolls back.
    pub async fn create_sale(&self, total_cents: i64, lines: &[SaleLine]) -> DbResult<Sale> {
        validate_total_cents(total_cents)?;
        validate_sale_lines(lines)?;

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let sale = insert_sale_with_items(&mut tx, total_cents, lines)
            .await
            .map_err(|e| DbError::SaleCreation(Box::new(e)))?;

        tx.commit()
            .await
            .map_err(|e| DbError::SaleCreation(Box::new(DbError::from(e))))?;

        debug!(sale_id = %sale.id, total_cents, items = lines.len(), "sale recorded");

        Ok(sale)
    }

    /// Gets a sale by id.
    ///
    /// ## Errors
    /// `NotFound` when no sale has that id.
    pub async fn get_sale(&self, id: &str) -> DbResult<Sale> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, total_cents, created_at FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        sale.ok_or_else(|| DbError::not_found("Sale", id))
    }

    /// Updates a sale's total (the only mutable field).
    pub async fn update_sale(&self, id: &str, total_cents: Option<i64>) -> DbResult<Sale> {
        if let Some(total_cents) = total_cents {
            validate_total_cents(total_cents)?;
        }

        let mut sale = self.get_sale(id).await?;

        if let Some(total_cents) = total_cents {
            sale.total_cents = total_cents;
        }

        sqlx::query("UPDATE sales SET total_cents = ?2 WHERE id = ?1")
            .bind(&sale.id)
            .bind(sale.total_cents)
            .execute(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Deletes a sale by id. Its items are removed with it (CASCADE).
    ///
    /// ## Errors
    /// `NotFound` when absent.
    pub async fn delete_sale(&self, id: &str) -> DbResult<()> {
        debug!(sale_id = %id, "deleting sale");

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id));
        }

        Ok(())
    }

    /// Best-effort bulk clear of sales (items cascade). Failures are logged,
    /// never raised.
    pub async fn delete_all_sales(&self) {
        if let Err(err) = sqlx::query("DELETE FROM sales").execute(&self.pool).await {
            error!(error = %err, "failed to clear sales");
        }
    }

    /// Lists all sales in insertion order.
    pub async fn list_sales(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, total_cents, created_at FROM sales ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    // =========================================================================
    // Line Items
    // =========================================================================

    /// Creates a single line item attached to an existing sale.
    ///
    /// Used for corrections; normal sale creation goes through
    /// [`Self::create_sale`], which writes the items itself.
    pub async fn create_item(
        &self,
        sale_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> DbResult<SaleItem> {
        validate_quantity(quantity)?;

        let item = SaleItem {
            id: Uuid::new_v4().to_string(),
            sale_id: sale_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
            created_at: Utc::now(),
        };

        debug!(item_id = %item.id, sale_id = %sale_id, product_id = %product_id, "inserting sale item");

        sqlx::query(
            r#"
            INSERT INTO sale_items (id, sale_id, product_id, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&item.id)
        .bind(&item.sale_id)
        .bind(&item.product_id)
        .bind(item.quantity)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets all items belonging to a sale, in insertion order.
    pub async fn get_items_by_sale(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, created_at
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Updates the quantity of a line item.
    ///
    /// ## Errors
    /// `NotFound` when the item id is absent; `Validation` for a
    /// non-positive quantity.
    pub async fn update_item_quantity(&self, item_id: &str, quantity: i64) -> DbResult<SaleItem> {
        validate_quantity(quantity)?;

        let result = sqlx::query("UPDATE sale_items SET quantity = ?2 WHERE id = ?1")
            .bind(item_id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("SaleItem", item_id));
        }

        let item = sqlx::query_as::<_, SaleItem>(
            "SELECT id, sale_id, product_id, quantity, created_at FROM sale_items WHERE id = ?1",
        )
        .bind(item_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Deletes a line item by id.
    ///
    /// ## Errors
    /// `NotFound` when absent.
    pub async fn delete_item(&self, item_id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM sale_items WHERE id = ?1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("SaleItem", item_id));
        }

        Ok(())
    }

    /// Best-effort bulk clear of line items. Failures are logged, never
    /// raised.
    pub async fn delete_all_items(&self) {
        if let Err(err) = sqlx::query("DELETE FROM sale_items").execute(&self.pool).await {
            error!(error = %err, "failed to clear sale items");
        }
    }

    /// Lists all line items in insertion order.
    pub async fn list_items(&self) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            "SELECT id, sale_id, product_id, quantity, created_at FROM sale_items ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts sales (for diagnostics and tests).
    pub async fn count_sales(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Inserts a sale header and its items on an open connection.
///
/// Shared by [`SaleRepository::create_sale`] (own transaction) and the
/// checkout workflow (transaction that also carries the stock decrements).
/// The caller owns the transaction boundary and the `SaleCreation` wrapping.
pub(crate) async fn insert_sale_with_items(
    conn: &mut SqliteConnection,
    total_cents: i64,
    lines: &[SaleLine],
) -> DbResult<Sale> {
    let now = Utc::now();
    let sale = Sale {
        id: Uuid::new_v4().to_string(),
        total_cents,
        created_at: now,
    };

    sqlx::query("INSERT INTO sales (id, total_cents, created_at) VALUES (?1, ?2, ?3)")
        .bind(&sale.id)
        .bind(sale.total_cents)
        .bind(sale.created_at)
        .execute(&mut *conn)
        .await?;

    for line in lines {
        sqlx::query(
            r#"
            INSERT INTO sale_items (id, sale_id, product_id, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&sale.id)
        .bind(&line.product_id)
        .bind(line.quantity)
        .bind(now)
        .execute(&mut *conn)
        .await?;
    }

    Ok(sale)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;
    use balcao_core::SaleLine;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn product(db: &Database, name: &str) -> String {
        db.products()
            .create(name, "test product", 5000)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_sale_with_items() {
        let db = test_db().await;
        let product_id = product(&db, "Bolo").await;

        let sale = db
            .sales()
            .create_sale(15000, &[SaleLine::new(&product_id, 3)])
            .await
            .unwrap();

        assert_eq!(sale.total_cents, 15000);

        let items = db.sales().get_items_by_sale(&sale.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, product_id);
        assert_eq!(items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_create_sale_rolls_back_on_item_failure() {
        let db = test_db().await;
        let product_id = product(&db, "Bolo").await;

        // Second line references a missing product: the item insert fails on
        // the FK and the whole transaction rolls back.
        let err = db
            .sales()
            .create_sale(
                20000,
                &[SaleLine::new(&product_id, 1), SaleLine::new("ghost", 2)],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::SaleCreation(_)));

        // No sale header and no items survive.
        assert_eq!(db.sales().count_sales().await.unwrap(), 0);
        assert!(db.sales().list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_sale_validates_proposal() {
        let db = test_db().await;
        let product_id = product(&db, "Bolo").await;

        let err = db.sales().create_sale(0, &[SaleLine::new(&product_id, 1)]).await;
        assert!(matches!(err.unwrap_err(), DbError::Validation(_)));

        let err = db.sales().create_sale(100, &[]).await;
        assert!(matches!(err.unwrap_err(), DbError::Validation(_)));

        let err = db
            .sales()
            .create_sale(100, &[SaleLine::new(&product_id, 0)])
            .await;
        assert!(matches!(err.unwrap_err(), DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_sale_crud() {
        let db = test_db().await;
        let product_id = product(&db, "Bolo").await;

        let sale = db
            .sales()
            .create_sale(5000, &[SaleLine::new(&product_id, 1)])
            .await
            .unwrap();

        let fetched = db.sales().get_sale(&sale.id).await.unwrap();
        assert_eq!(fetched.total_cents, 5000);

        let updated = db.sales().update_sale(&sale.id, Some(5500)).await.unwrap();
        assert_eq!(updated.total_cents, 5500);

        db.sales().delete_sale(&sale.id).await.unwrap();
        let err = db.sales().get_sale(&sale.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // Items went with the sale.
        assert!(db.sales().list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sale_not_found_paths() {
        let db = test_db().await;

        assert!(matches!(
            db.sales().get_sale("ghost").await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            db.sales().update_sale("ghost", Some(100)).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            db.sales().delete_sale("ghost").await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_item_crud() {
        let db = test_db().await;
        let product_id = product(&db, "Bolo").await;
        let other_product_id = product(&db, "Cafe").await;

        let sale = db
            .sales()
            .create_sale(5000, &[SaleLine::new(&product_id, 1)])
            .await
            .unwrap();

        let item = db
            .sales()
            .create_item(&sale.id, &other_product_id, 2)
            .await
            .unwrap();
        assert_eq!(db.sales().get_items_by_sale(&sale.id).await.unwrap().len(), 2);

        let updated = db.sales().update_item_quantity(&item.id, 4).await.unwrap();
        assert_eq!(updated.quantity, 4);

        db.sales().delete_item(&item.id).await.unwrap();
        assert_eq!(db.sales().get_items_by_sale(&sale.id).await.unwrap().len(), 1);

        assert!(matches!(
            db.sales().update_item_quantity("ghost", 1).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            db.sales().delete_item("ghost").await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_all_sales_never_raises() {
        let db = test_db().await;
        let product_id = product(&db, "Bolo").await;

        db.sales()
            .create_sale(5000, &[SaleLine::new(&product_id, 1)])
            .await
            .unwrap();

        db.sales().delete_all_items().await;
        db.sales().delete_all_sales().await;

        assert_eq!(db.sales().count_sales().await.unwrap(), 0);
    }
}
