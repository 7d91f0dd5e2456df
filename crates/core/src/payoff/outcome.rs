//! Plan outcomes and summaries derived from a payoff schedule.
//!
//! The engine reports shortfalls and exhausted horizons through the shape
//! of the schedule rather than through errors. This module reads that
//! shape back:
//!
//! - empty schedule: nothing was owed
//! - last statement carries a warning: the budget stopped covering minimums
//! - last statement has a zero total balance: every debt was paid off
//! - a balance left and no warning: the month cap stopped the plan; for a
//!   schedule from `simulate` that means exactly `max_months` statements

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PayoffError;
use super::types::{Debt, MonthlyStatement};

/// How a payoff schedule ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanOutcome {
    /// No debt had a positive balance.
    NoDebt,
    /// Every debt reached zero.
    PaidOff {
        /// Month in which the last debt was cleared.
        months: u32,
    },
    /// The budget fell below the minimum payments.
    Shortfall {
        /// Month the shortfall was detected.
        month: u32,
    },
    /// The month cap was hit with debt remaining.
    HorizonReached {
        /// The month cap.
        max_months: u32,
    },
}

impl PlanOutcome {
    /// Classifies a schedule produced with the given month cap.
    ///
    /// The length of the schedule is not checked against `max_months`; any
    /// statement list ending with a positive balance and no warning is
    /// reported as [`PlanOutcome::HorizonReached`].
    #[must_use]
    pub fn classify(statements: &[MonthlyStatement], max_months: u32) -> Self {
        let Some(last) = statements.last() else {
            return Self::NoDebt;
        };

        if last.is_shortfall() {
            Self::Shortfall { month: last.month }
        } else if last.total_balance.is_zero() {
            Self::PaidOff { months: last.month }
        } else {
            Self::HorizonReached { max_months }
        }
    }

    /// Returns true if the plan clears every debt.
    #[must_use]
    pub const fn is_debt_free(self) -> bool {
        matches!(self, Self::NoDebt | Self::PaidOff { .. })
    }
}

/// Per-debt totals over a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPayoff {
    /// Debt name.
    pub name: String,
    /// Total paid towards this debt.
    pub total_paid: Decimal,
    /// First month the balance reached zero, if it did; `0` for a debt
    /// that started cleared.
    pub paid_off_month: Option<u32>,
}

/// Aggregate view of a payoff schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// How the schedule ended.
    pub outcome: PlanOutcome,
    /// Number of statements.
    pub months: u32,
    /// Sum of balances before the first month.
    pub starting_balance: Decimal,
    /// Total balance on the last statement.
    pub ending_balance: Decimal,
    /// Total actually applied to debts.
    pub total_paid: Decimal,
    /// Interest accrued over the schedule.
    pub total_interest: Decimal,
    /// Per-debt breakdown, in input order.
    pub debts: Vec<DebtPayoff>,
}

impl PlanSummary {
    /// Builds a summary from the debts a schedule started with.
    ///
    /// `debts` must be the same slice that was simulated.
    ///
    /// # Errors
    ///
    /// Returns [`PayoffError::AmountOverflow`] if a total does not fit in a
    /// decimal.
    pub fn from_schedule(
        debts: &[Debt],
        statements: &[MonthlyStatement],
        max_months: u32,
    ) -> Result<Self, PayoffError> {
        let starting_balance = checked_sum(debts.iter().map(|d| d.balance), "starting_balance")?;
        let ending_balance = statements
            .last()
            .map_or(starting_balance, |s| s.total_balance);

        let mut per_debt: Vec<DebtPayoff> = debts
            .iter()
            .map(|debt| DebtPayoff {
                name: debt.name.clone(),
                total_paid: Decimal::ZERO,
                paid_off_month: (!debt.is_outstanding()).then_some(0),
            })
            .collect();

        for statement in statements.iter().filter(|s| !s.is_shortfall()) {
            for (entry, payment) in per_debt.iter_mut().zip(&statement.details) {
                entry.total_paid = entry
                    .total_paid
                    .checked_add(payment.total())
                    .ok_or_else(|| overflow(&entry.name))?;
                if entry.paid_off_month.is_none() && payment.balance_after.is_zero() {
                    entry.paid_off_month = Some(statement.month);
                }
            }
        }

        let total_paid = checked_sum(per_debt.iter().map(|d| d.total_paid), "total_paid")?;
        let total_interest = total_paid
            .checked_sub(starting_balance)
            .and_then(|net| net.checked_add(ending_balance))
            .ok_or_else(|| overflow("total_interest"))?;

        Ok(Self {
            outcome: PlanOutcome::classify(statements, max_months),
            months: u32::try_from(statements.len()).unwrap_or(u32::MAX),
            starting_balance,
            ending_balance,
            total_paid,
            total_interest,
            debts: per_debt,
        })
    }
}

fn checked_sum(
    mut amounts: impl Iterator<Item = Decimal>,
    name: &str,
) -> Result<Decimal, PayoffError> {
    amounts.try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).ok_or_else(|| overflow(name))
    })
}

fn overflow(name: &str) -> PayoffError {
    PayoffError::AmountOverflow {
        name: name.to_string(),
    }
}
