//! Liability overview and sort-only payoff orderings.
//!
//! Turns ledger accounts into the debt lines shown before a full
//! simulation is run: amount owed, derived minimum payment, a naive
//! months-to-payoff estimate, and the snowball/avalanche listings.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::error::PayoffError;
use super::types::Debt;

/// A ledger account as supplied by the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityAccount {
    /// Account name.
    pub name: String,
    /// Current ledger balance; negative means money is owed.
    pub balance: Decimal,
    /// Annual interest rate in percent.
    #[serde(default)]
    pub interest_rate: Option<Decimal>,
    /// Minimum payment as a percentage of the amount owed.
    #[serde(default)]
    pub min_payment_percent: Option<Decimal>,
}

/// One debt line of the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtLine {
    /// Account name.
    pub name: String,
    /// Amount owed (absolute value of the ledger balance).
    pub debt_amount: Decimal,
    /// Annual interest rate in percent, zero when unknown.
    pub interest_rate: Decimal,
    /// Minimum payment percentage, zero when unknown.
    pub min_percent: Decimal,
    /// Minimum payment rounded to cents; absent without a percentage.
    pub min_payment: Option<Decimal>,
    /// Months to clear the debt paying only the minimum, ignoring interest.
    pub months_to_payoff: Option<u32>,
}

impl DebtLine {
    fn from_account(account: &LiabilityAccount) -> Result<Option<Self>, PayoffError> {
        if account.balance >= Decimal::ZERO {
            return Ok(None);
        }

        let debt_amount = account.balance.abs();
        let min_percent = account.min_payment_percent.unwrap_or(Decimal::ZERO);
        let min_payment = if min_percent > Decimal::ZERO {
            let payment = debt_amount
                .checked_mul(min_percent)
                .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
                .ok_or_else(|| PayoffError::AmountOverflow {
                    name: account.name.clone(),
                })?;
            Some(payment.round_dp(2))
        } else {
            None
        };
        let months_to_payoff = min_payment
            .filter(|payment| *payment > Decimal::ZERO)
            .and_then(|payment| ceil_months(debt_amount, payment));

        Ok(Some(Self {
            name: account.name.clone(),
            debt_amount,
            interest_rate: account.interest_rate.unwrap_or(Decimal::ZERO),
            min_percent,
            min_payment,
            months_to_payoff,
        }))
    }

    /// Converts the line into a simulator debt; a missing minimum pays nothing.
    #[must_use]
    pub fn to_debt(&self) -> Debt {
        Debt::new(
            self.name.clone(),
            self.debt_amount,
            self.interest_rate,
            self.min_payment.unwrap_or(Decimal::ZERO),
        )
    }
}

/// Overview of every account that currently carries debt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtOverview {
    /// Debt lines, in account order.
    pub debts: Vec<DebtLine>,
    /// Sum of all amounts owed.
    pub total_debt: Decimal,
}

impl DebtOverview {
    /// Builds the overview, skipping accounts that are not in debt.
    ///
    /// # Errors
    ///
    /// Returns [`PayoffError::AmountOverflow`] if a minimum payment or the
    /// total debt does not fit in a decimal.
    pub fn from_accounts(accounts: &[LiabilityAccount]) -> Result<Self, PayoffError> {
        let mut debts = Vec::with_capacity(accounts.len());
        for account in accounts {
            if let Some(line) = DebtLine::from_account(account)? {
                debts.push(line);
            }
        }

        let total_debt = debts
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.debt_amount))
            .ok_or_else(|| PayoffError::AmountOverflow {
                name: "total_debt".to_string(),
            })?;
        Ok(Self { debts, total_debt })
    }

    /// Number of debt lines.
    #[must_use]
    pub fn debt_count(&self) -> usize {
        self.debts.len()
    }

    /// Lines ordered smallest amount first.
    #[must_use]
    pub fn snowball_order(&self) -> Vec<&DebtLine> {
        let mut ordered: Vec<&DebtLine> = self.debts.iter().collect();
        ordered.sort_by_key(|d| d.debt_amount);
        ordered
    }

    /// Lines ordered highest interest rate first.
    #[must_use]
    pub fn avalanche_order(&self) -> Vec<&DebtLine> {
        let mut ordered: Vec<&DebtLine> = self.debts.iter().collect();
        ordered.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate));
        ordered
    }

    /// Months to clear the total at a flat budget, ignoring interest.
    #[must_use]
    pub fn naive_months(&self, monthly_budget: Decimal) -> Option<u32> {
        if monthly_budget <= Decimal::ZERO || self.total_debt <= Decimal::ZERO {
            return None;
        }
        ceil_months(self.total_debt, monthly_budget)
    }

    /// Simulator debts for every line, in account order.
    #[must_use]
    pub fn to_debts(&self) -> Vec<Debt> {
        self.debts.iter().map(DebtLine::to_debt).collect()
    }
}

fn ceil_months(amount: Decimal, per_month: Decimal) -> Option<u32> {
    amount.checked_div(per_month)?.ceil().to_u32()
}
