//! # balcao-core: Pure Business Logic for Balcao POS
//!
//! This crate contains the domain rules of the point-of-sale core as pure
//! functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Balcao POS Architecture                   │
//! │                                                             │
//! │  Terminal app / tooling (external collaborators)            │
//! │                           │                                 │
//! │  ┌────────────────────────▼────────────────────────────┐    │
//! │  │            ★ balcao-core (THIS CRATE) ★             │    │
//! │  │                                                     │    │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌────────┐  │    │
//! │  │  │  types  │ │  money  │ │ validation │ │payment │  │    │
//! │  │  │ Product │ │  Money  │ │   rules    │ │ settle │  │    │
//! │  │  │  Sale   │ │ (cents) │ │   checks   │ │        │  │    │
//! │  │  └─────────┘ └─────────┘ └────────────┘ └────────┘  │    │
//! │  │                                                     │    │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS │    │
//! │  └────────────────────────┬────────────────────────────┘    │
//! │                           │                                 │
//! │  ┌────────────────────────▼────────────────────────────┐    │
//! │  │              balcao-db (Storage Layer)              │    │
//! │  │     SQLite pool, repositories, checkout workflow    │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, StorageEntry, Sale, SaleItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Business rule validation
//! - [`payment`] - Payment method settlement
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: storage and network access live in balcao-db
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: typed errors, never strings or panics

pub mod error;
pub mod money;
pub mod payment;
pub mod types;
pub mod validation;

// Re-exports so users can do `use balcao_core::Money` instead of
// `use balcao_core::money::Money`.
pub use error::ValidationError;
pub use money::Money;
pub use payment::{PaymentMethod, PaymentReceipt};
pub use types::*;
