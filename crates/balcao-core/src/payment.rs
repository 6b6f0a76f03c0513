//! # Payment Settlement
//!
//! A closed set of payment methods and a single settlement function.
//!
//! ## User Workflow
//! ```text
//! Checkout commits sale (total: $15.00)
//!      │
//!      ▼
//! PaymentMethod::Cash { tendered: $20.00 }.settle(total)
//!      │
//!      ├── tendered < total? → ValidationError::InsufficientTender
//!      │
//!      └── OK → PaymentReceipt { message, change: $5.00 }
//! ```
//!
//! Credit and Pix settle instantly with zero change; the only business rule
//! beyond message production is that cash tendered must cover the total.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

/// How a sale is paid. Closed tagged union; no trait hierarchy needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum PaymentMethod {
    /// Physical cash; carries the amount the customer handed over.
    Cash { tendered: Money },
    /// Card payment on an external terminal.
    Credit,
    /// Instant bank transfer.
    Pix,
}

/// Outcome of a successful settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Human-readable confirmation for the receipt footer.
    pub message: String,

    /// Change due to the customer (zero for non-cash methods).
    pub change: Money,
}

impl PaymentMethod {
    /// Settles a sale total with this payment method.
    ///
    /// Fails with [`ValidationError::InsufficientTender`] when cash tendered
    /// does not cover the total.
    pub fn settle(&self, total: Money) -> ValidationResult<PaymentReceipt> {
        match *self {
            PaymentMethod::Cash { tendered } => {
                if tendered < total {
                    return Err(ValidationError::InsufficientTender { tendered, total });
                }
                let change = tendered - total;
                Ok(PaymentReceipt {
                    message: format!("Cash payment accepted. Change: {change}"),
                    change,
                })
            }
            PaymentMethod::Credit => Ok(PaymentReceipt {
                message: "Credit card payment processed.".to_string(),
                change: Money::zero(),
            }),
            PaymentMethod::Pix => Ok(PaymentReceipt {
                message: "Pix payment processed.".to_string(),
                change: Money::zero(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_with_change() {
        let method = PaymentMethod::Cash {
            tendered: Money::from_cents(2000),
        };
        let receipt = method.settle(Money::from_cents(1500)).unwrap();
        assert_eq!(receipt.change, Money::from_cents(500));
        assert_eq!(receipt.message, "Cash payment accepted. Change: $5.00");
    }

    #[test]
    fn test_cash_exact() {
        let method = PaymentMethod::Cash {
            tendered: Money::from_cents(1500),
        };
        let receipt = method.settle(Money::from_cents(1500)).unwrap();
        assert!(receipt.change.is_zero());
    }

    #[test]
    fn test_cash_insufficient() {
        let method = PaymentMethod::Cash {
            tendered: Money::from_cents(1000),
        };
        let err = method.settle(Money::from_cents(1500)).unwrap_err();
        assert!(matches!(err, ValidationError::InsufficientTender { .. }));
    }

    #[test]
    fn test_credit_and_pix_settle_with_zero_change() {
        let total = Money::from_cents(990);

        let receipt = PaymentMethod::Credit.settle(total).unwrap();
        assert!(receipt.change.is_zero());

        let receipt = PaymentMethod::Pix.settle(total).unwrap();
        assert!(receipt.change.is_zero());
    }
}
