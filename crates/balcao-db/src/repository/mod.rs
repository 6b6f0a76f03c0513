//! # Repository Implementations
//!
//! One repository per entity family:
//!
//! - [`product`] - product catalog CRUD
//! - [`storage`] - stock ledger (quantity-on-hand, never negative)
//! - [`sale`] - sale headers and line items
//!
//! Each repository owns a pool clone and exposes typed operations; the
//! multi-step checkout workflow lives in [`crate::checkout`].

pub mod product;
pub mod sale;
pub mod storage;
