//! Payoff error types.

use debtplan_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Payoff-related errors.
///
/// A budget shortfall and an exhausted month horizon are not errors; both
/// are reported through the shape of the returned schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayoffError {
    /// Debt balance is negative.
    #[error("Debt '{name}' has a negative balance")]
    NegativeBalance {
        /// Debt name.
        name: String,
    },

    /// Annual interest rate is negative.
    #[error("Debt '{name}' has a negative interest rate")]
    NegativeInterestRate {
        /// Debt name.
        name: String,
    },

    /// Minimum payment is negative.
    #[error("Debt '{name}' has a negative minimum payment")]
    NegativeMinPayment {
        /// Debt name.
        name: String,
    },

    /// Monthly budget is negative.
    #[error("Monthly budget cannot be negative: {0}")]
    NegativeBudget(Decimal),

    /// Strategy label is not one of the supported strategies.
    #[error("Unrecognized payoff strategy: {0}")]
    UnrecognizedStrategy(String),

    /// A balance outgrew the decimal range.
    #[error("Balance of debt '{name}' overflowed in month {month}")]
    ArithmeticOverflow {
        /// Debt name.
        name: String,
        /// Month in which the overflow happened.
        month: u32,
    },

    /// A total or derived amount does not fit in a decimal.
    #[error("Amount '{name}' is out of range")]
    AmountOverflow {
        /// Name of the amount or account.
        name: String,
    },
}

impl From<PayoffError> for AppError {
    fn from(err: PayoffError) -> Self {
        match err {
            PayoffError::ArithmeticOverflow { .. } | PayoffError::AmountOverflow { .. } => {
                Self::BusinessRule(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}
