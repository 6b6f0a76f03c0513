//! # Checkout Workflow
//!
//! Orchestrates a sale end to end: stock verification, the single
//! authoritative stock decrement, and sale persistence - all inside one
//! SQLite transaction.
//!
//! ## Transaction Shape
//! ```text
//! process_sale(total, lines)
//!      │  validate total and lines (no writes yet)
//!      ▼
//! BEGIN
//!   for each line:
//!     SELECT oldest entry for product   ── missing  → NotFound
//!     check quantity_on_hand            ── short    → InsufficientStock
//!     UPDATE entry SET quantity -= line.quantity
//!   INSERT sale + items                 ── failure  → SaleCreation(cause)
//! COMMIT
//! ```
//!
//! Any failure rolls the whole transaction back: stock is decremented
//! exactly once per sold line, and never without the sale row that
//! explains it. Stock-phase failures (`NotFound`, `InsufficientStock`)
//! propagate unchanged; persistence-phase failures come back wrapped in
//! [`DbError::SaleCreation`].

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::sale::insert_sale_with_items;
use balcao_core::validation::{validate_sale_lines, validate_total_cents};
use balcao_core::{Sale, SaleLine};

/// The sale orchestrator. Cheap to create; obtain one per call via
/// [`crate::Database::checkout`].
#[derive(Debug, Clone)]
pub struct Checkout {
    pool: SqlitePool,
}

impl Checkout {
    /// Creates a new Checkout over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Checkout { pool }
    }

    /// Processes a sale: verifies stock for every line, decrements it, and
    /// records the sale - atomically.
    ///
    /// ## Errors
    /// - `Validation` for a non-positive total, empty lines, or a
    ///   non-positive line quantity (checked before the transaction opens)
    /// - `NotFound` when a line's product has no stock entry
    /// - `InsufficientStock` when a line asks for more than is on hand
    /// - `SaleCreation` when the persistence step itself fails
    ///
    /// On any error nothing is written: stock stays as it was and no sale
    /// or item rows exist.
    pub async fn process_sale(&self, total_cents: i64, lines: &[SaleLine]) -> DbResult<Sale> {
        validate_total_cents(total_cents)?;
        validate_sale_lines(lines)?;

        debug!(total_cents, line_count = lines.len(), "starting checkout");

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        for line in lines {
            // Oldest entry for the product carries the quantity-on-hand.
            let entry: Option<(String, i64)> = sqlx::query_as(
                r#"
                SELECT id, quantity
                FROM storage_entries
                WHERE product_id = ?1
                ORDER BY rowid
                LIMIT 1
                "#,
            )
            .bind(&line.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            let (entry_id, available) = entry
                .ok_or_else(|| DbError::not_found("StorageEntry", line.product_id.clone()))?;

            if line.quantity > available {
                return Err(DbError::InsufficientStock {
                    product_id: line.product_id.clone(),
                    available,
                    requested: line.quantity,
                });
            }

            sqlx::query("UPDATE storage_entries SET quantity = quantity - ?2 WHERE id = ?1")
                .bind(&entry_id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await?;

            debug!(
                product_id = %line.product_id,
                sold = line.quantity,
                remaining = available - line.quantity,
                "stock decremented"
            );
        }

        let sale = insert_sale_with_items(&mut tx, total_cents, lines)
            .await
            .map_err(|e| DbError::SaleCreation(Box::new(e)))?;

        tx.commit()
            .await
            .map_err(|e| DbError::SaleCreation(Box::new(DbError::from(e))))?;

        info!(
            sale_id = %sale.id,
            total_cents,
            line_count = lines.len(),
            "sale completed"
        );

        Ok(sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
