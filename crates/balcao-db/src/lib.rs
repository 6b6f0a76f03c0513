//! # balcao-db: Database Layer for Balcao POS
//!
//! This crate provides database access for the Balcao POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                      Balcao POS Data Flow                          │
//! │                                                                    │
//! │  Caller (terminal app, tests, seed tool)                           │
//! │       │                                                            │
//! │       ▼                                                            │
//! │  ┌──────────────────────────────────────────────────────────────┐ │
//! │  │                   balcao-db (THIS CRATE)                     │ │
//! │  │                                                              │ │
//! │  │  ┌────────────┐  ┌───────────────┐  ┌──────────────────┐   │ │
//! │  │  │  Database  │  │ Repositories  │  │    Checkout      │   │ │
//! │  │  │ (pool.rs)  │  │ (repository/) │  │  (checkout.rs)   │   │ │
//! │  │  │            │  │               │  │                  │   │ │
//! │  │  │ SqlitePool │◄─│ ProductRepo   │  │ stock check +    │   │ │
//! │  │  │ Migrations │  │ StorageRepo   │  │ decrement + sale │   │ │
//! │  │  │            │  │ SaleRepo      │  │ in one txn       │   │ │
//! │  │  └────────────┘  └───────────────┘  └──────────────────┘   │ │
//! │  └──────────────────────────────────────────────────────────────┘ │
//! │       │                                                            │
//! │       ▼                                                            │
//! │                   SQLite Database (balcao.db)                      │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation, configuration, and the facade
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, storage, sale)
//! - [`checkout`] - The transactional sale workflow
//!
//! ## Usage
//!
//! ```rust,ignore
//! use balcao_db::{Database, DbConfig};
//! use balcao_core::SaleLine;
//!
//! let db = Database::new(DbConfig::new("path/to/balcao.db")).await?;
//!
//! let product = db.products().create("Bolo", "Chocolate cake", 5000).await?;
//! db.storage().create_entry(&product.id, 3, 1000).await?;
//!
//! let sale = db
//!     .checkout()
//!     .process_sale(15000, &[SaleLine::new(&product.id, 3)])
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use checkout::Checkout;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::storage::StorageRepository;
