//! # Storage Repository
//!
//! The stock ledger: per-product quantity-on-hand and unit cost.
//!
//! ## The One Rule
//! ```text
//! quantity >= 0, ALWAYS
//!
//! adjust_stock(delta)          remove_sold(quantity_sold)
//!      │                             │
//!      ▼                             ▼
//! current + delta < 0?         quantity_sold > current?
//!      │ yes                         │ yes
//!      ▼                             ▼
//! InsufficientStock            InsufficientStock
//! (entry unchanged)            (entry unchanged)
//! ```
//!
//! Both paths reject before writing; the schema CHECK constraint is the
//! backstop. `remove_sold` rejects using the *requested* quantity up front,
//! `adjust_stock` rejects the computed result - same invariant, two call
//! sites with different reporting needs.
//!
//! One entry per product is expected but not enforced unique; lookups take
//! the oldest entry for the product and mutations target that row by its
//! own id, never by product id.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use balcao_core::validation::validate_stock_quantity;
use balcao_core::StorageEntry;

/// Repository for stock ledger operations.
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    /// Creates a new StorageRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }

    /// Creates a stock entry for a product.
    ///
    /// Quantity and cost are accepted as given; the product FK and the
    /// quantity CHECK constraint are the only guards here.
    pub async fn create_entry(
        &self,
        product_id: &str,
        quantity: i64,
        cost_cents: i64,
    ) -> DbResult<StorageEntry> {
        let entry = StorageEntry {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            quantity,
            cost_cents,
            created_at: Utc::now(),
        };

        debug!(id = %entry.id, product_id = %product_id, quantity, "inserting stock entry");

        sqlx::query(
            r#"
            INSERT INTO storage_entries (id, product_id, quantity, cost_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.product_id)
        .bind(entry.quantity)
        .bind(entry.cost_cents)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Gets the stock entry for a product.
    ///
    /// ## Errors
    /// `NotFound` when the product has no entry.
    pub async fn get_entry(&self, product_id: &str) -> DbResult<StorageEntry> {
        let entry = sqlx::query_as::<_, StorageEntry>(
            r#"
            SELECT id, product_id, quantity, cost_cents, created_at
            FROM storage_entries
            WHERE product_id = ?1
            ORDER BY rowid
            LIMIT 1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        entry.ok_or_else(|| DbError::not_found("StorageEntry", product_id))
    }

    /// Updates a product's stock entry. Only supplied fields change.
    ///
    /// A negative quantity is rejected; a cost of zero or less is silently
    /// ignored (the stored cost stays).
    pub async fn update_entry(
        &self,
        product_id: &str,
        quantity: Option<i64>,
        cost_cents: Option<i64>,
    ) -> DbResult<StorageEntry> {
        if let Some(quantity) = quantity {
            validate_stock_quantity(quantity)?;
        }

        let mut entry = self.get_entry(product_id).await?;

        if let Some(quantity) = quantity {
            entry.quantity = quantity;
        }
        if let Some(cost_cents) = cost_cents {
            if cost_cents > 0 {
                entry.cost_cents = cost_cents;
            }
        }

        debug!(id = %entry.id, product_id = %product_id, "updating stock entry");

        sqlx::query(
            r#"
            UPDATE storage_entries SET quantity = ?2, cost_cents = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&entry.id)
        .bind(entry.quantity)
        .bind(entry.cost_cents)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Returns the quantity on hand for a product.
    ///
    /// ## Errors
    /// `NotFound` when the product has no entry.
    pub async fn get_stock(&self, product_id: &str) -> DbResult<i64> {
        Ok(self.get_entry(product_id).await?.quantity)
    }

    /// Adds a signed delta to a product's stock.
    ///
    /// ## Errors
    /// `InsufficientStock` if the result would be negative (entry unchanged);
    /// `NotFound` when the product has no entry.
    pub async fn adjust_stock(&self, product_id: &str, delta: i64) -> DbResult<StorageEntry> {
        let mut entry = self.get_entry(product_id).await?;

        let new_quantity = entry.quantity + delta;
        if new_quantity < 0 {
            return Err(DbError::InsufficientStock {
                product_id: product_id.to_string(),
                available: entry.quantity,
                requested: -delta,
            });
        }

        debug!(product_id = %product_id, delta, new_quantity, "adjusting stock");

        sqlx::query("UPDATE storage_entries SET quantity = ?2 WHERE id = ?1")
            .bind(&entry.id)
            .bind(new_quantity)
            .execute(&self.pool)
            .await?;

        entry.quantity = new_quantity;
        Ok(entry)
    }

    /// Sale-path decrement: removes a sold quantity from stock.
    ///
    /// Rejects the request outright when the requested quantity exceeds what
    /// is available.
    pub async fn remove_sold(&self, product_id: &str, quantity_sold: i64) -> DbResult<StorageEntry> {
        let mut entry = self.get_entry(product_id).await?;

        if quantity_sold > entry.quantity {
            return Err(DbError::InsufficientStock {
                product_id: product_id.to_string(),
                available: entry.quantity,
                requested: quantity_sold,
            });
        }

        let new_quantity = entry.quantity - quantity_sold;

        debug!(product_id = %product_id, quantity_sold, new_quantity, "removing sold stock");

        sqlx::query("UPDATE storage_entries SET quantity = ?2 WHERE id = ?1")
            .bind(&entry.id)
            .bind(new_quantity)
            .execute(&self.pool)
            .await?;

        entry.quantity = new_quantity;
        Ok(entry)
    }

    /// Deletes a product's stock entry.
    ///
    /// ## Errors
    /// `NotFound` when the product has no entry.
    pub async fn delete_entry(&self, product_id: &str) -> DbResult<()> {
        let entry = self.get_entry(product_id).await?;

        debug!(id = %entry.id, product_id = %product_id, "deleting stock entry");

        sqlx::query("DELETE FROM storage_entries WHERE id = ?1")
            .bind(&entry.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Best-effort bulk clear. Failures are logged, never raised.
    pub async fn delete_all(&self) {
        if let Err(err) = sqlx::query("DELETE FROM storage_entries")
            .execute(&self.pool)
            .await
        {
            error!(error = %err, "failed to clear storage entries");
        }
    }

    /// Lists all stock entries in insertion order.
    pub async fn list(&self) -> DbResult<Vec<StorageEntry>> {
        let entries = sqlx::query_as::<_, StorageEntry>(
            r#"
            SELECT id, product_id, quantity, cost_cents, created_at
            FROM storage_entries
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
