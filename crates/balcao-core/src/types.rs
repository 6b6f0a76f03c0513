//! # Domain Types
//!
//! Core entity types for the sale/stock engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                            │
//! │                                                                │
//! │  ┌───────────────┐  ┌────────────────┐  ┌──────────────────┐  │
//! │  │    Product    │  │  StorageEntry  │  │      Sale        │  │
//! │  │ ───────────── │  │ ────────────── │  │ ──────────────── │  │
//! │  │ id (UUID)     │  │ id (UUID)      │  │ id (UUID)        │  │
//! │  │ name          │  │ product_id(FK) │  │ total_cents      │  │
//! │  │ description   │  │ quantity >= 0  │  │ created_at       │  │
//! │  │ price_cents   │  │ cost_cents     │  └───────┬──────────┘  │
//! │  └───────────────┘  │ created_at     │          │ 1..n        │
//! │                     └────────────────┘  ┌───────▼──────────┐  │
//! │                                         │    SaleItem      │  │
//! │                                         │ ──────────────── │  │
//! │                                         │ sale_id (FK)     │  │
//! │                                         │ product_id (FK)  │  │
//! │                                         │ quantity > 0     │  │
//! │                                         └──────────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity carries a system-assigned UUID v4 id, generated by the
//! storage layer at insert time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog, available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name (never empty).
    pub name: String,

    /// Free-text description (never empty).
    pub description: String,

    /// Sale price in cents, strictly positive.
    pub price_cents: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Storage Entry
// =============================================================================

/// A stock-ledger entry: quantity-on-hand and unit cost for one product.
///
/// One active entry per product is expected, but uniqueness is not enforced;
/// lookups by product take the oldest entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StorageEntry {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product this entry tracks stock for.
    pub product_id: String,

    /// Quantity on hand. Never negative; every mutation that would drive it
    /// below zero is rejected before persisting.
    pub quantity: i64,

    /// Unit cost in cents.
    pub cost_cents: i64,

    /// When the entry was created. Set once, immutable.
    pub created_at: DateTime<Utc>,
}

impl StorageEntry {
    /// Returns the unit cost as a Money value.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale header. Items are stored separately as [`SaleItem`] rows
/// and are created atomically with the header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Caller-supplied sale total in cents, strictly positive.
    /// Not recomputed from item prices.
    pub total_cents: i64,

    /// When the sale was recorded. Immutable.
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale total as a Money value.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item belonging to one sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Sale this item belongs to.
    pub sale_id: String,

    /// Product sold.
    pub product_id: String,

    /// Quantity sold, strictly positive.
    pub quantity: i64,

    /// When the item was recorded.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale Line (proposal)
// =============================================================================

/// One proposed line of a sale: what the caller wants to sell.
///
/// Input to the checkout workflow and to the sale recorder; becomes a
/// [`SaleItem`] row once the sale commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    /// Product to sell.
    pub product_id: String,

    /// Quantity to sell, strictly positive.
    pub quantity: i64,
}

impl SaleLine {
    /// Convenience constructor.
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        SaleLine {
            product_id: product_id.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_price_as_money() {
        let product = Product {
            id: "p1".to_string(),
            name: "Bolo".to_string(),
            description: "Chocolate cake".to_string(),
            price_cents: 5000,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.price(), Money::from_cents(5000));
        assert_eq!(format!("{}", product.price()), "$50.00");
    }

    #[test]
    fn test_entry_cost_and_sale_total_as_money() {
        let entry = StorageEntry {
            id: "e1".to_string(),
            product_id: "p1".to_string(),
            quantity: 3,
            cost_cents: 1000,
            created_at: Utc::now(),
        };
        assert_eq!(entry.cost(), Money::from_cents(1000));

        let sale = Sale {
            id: "s1".to_string(),
            total_cents: 15000,
            created_at: Utc::now(),
        };
        assert_eq!(sale.total(), Money::from_cents(15000));
        assert_eq!(format!("{}", sale.total()), "$150.00");
    }

    #[test]
    fn test_sale_line_constructor() {
        let line = SaleLine::new("p1", 3);
        assert_eq!(line.product_id, "p1");
        assert_eq!(line.quantity, 3);
    }
}
