//! # Validation Error Types
//!
//! Input validation failures for balcao-core.
//!
//! ## Error Flow
//! ```text
//! ValidationError (this module)
//!      │  #[from]
//!      ▼
//! balcao_db::DbError::Validation ──► caller
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

/// Input validation errors.
///
/// These occur when a caller's input doesn't meet requirements. Used for
/// early validation before any storage operation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Cash tendered does not cover the sale total.
    #[error("amount tendered {tendered} does not cover total {total}")]
    InsufficientTender { tendered: Money, total: Money },
}

/// Convenience alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;
