//! Payoff engine producing month-by-month amortization schedules.

use std::hash::{DefaultHasher, Hash, Hasher};

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::PayoffError;
use super::strategy::Strategy;
use super::types::{Debt, MonthlyPayment, MonthlyStatement, ShortfallWarning, SimulationInput};
use super::validation::validate_input;

/// Engine for running payoff simulations.
pub struct PayoffEngine;

impl PayoffEngine {
    /// Runs a simulation for the given input.
    ///
    /// # Errors
    ///
    /// See [`simulate`].
    pub fn run(input: &SimulationInput) -> Result<Vec<MonthlyStatement>, PayoffError> {
        simulate(
            &input.debts,
            input.monthly_budget,
            input.strategy,
            input.max_months,
        )
    }

    /// Deterministic hash of an input, used as a cache key.
    ///
    /// Decimals hash by value, so `1.0` and `1.00` produce the same key.
    #[must_use]
    pub fn hash_input(input: &SimulationInput) -> String {
        let mut hasher = DefaultHasher::new();
        input.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

/// Projects a payoff schedule.
///
/// Works on a copy of `debts`; the caller's slice is never touched. Stops
/// when every balance is zero, after `max_months` months, or on the first
/// month whose minimum payments exceed `monthly_budget`. That shortfall
/// month is emitted with a warning and is always the last statement.
///
/// # Errors
///
/// Returns a validation error for any negative amount, before simulating,
/// or [`PayoffError::ArithmeticOverflow`] if a balance leaves the decimal range.
pub fn simulate(
    debts: &[Debt],
    monthly_budget: Decimal,
    strategy: Strategy,
    max_months: u32,
) -> Result<Vec<MonthlyStatement>, PayoffError> {
    validate_input(debts, monthly_budget)?;

    let mut working = debts.to_vec();
    let mut plan = Vec::new();
    let mut month = 0;

    debug!(
        debts = working.len(),
        %monthly_budget,
        %strategy,
        max_months,
        "starting payoff simulation"
    );

    while month < max_months && working.iter().any(Debt::is_outstanding) {
        month += 1;

        accrue_interest(&mut working, month)?;

        let mut details: Vec<MonthlyPayment> = working
            .iter()
            .map(|debt| MonthlyPayment {
                name: debt.name.clone(),
                pay_min: minimum_due(debt),
                extra: Decimal::ZERO,
                balance_after: debt.balance,
            })
            .collect();
        let total_min = checked_total(details.iter().map(|p| p.pay_min), month)?;

        if monthly_budget < total_min {
            info!(month, %total_min, %monthly_budget, "budget does not cover minimum payments");
            plan.push(MonthlyStatement {
                month,
                details,
                total_payment: monthly_budget,
                total_balance: checked_total(working.iter().map(|d| d.balance), month)?,
                warning: Some(ShortfallWarning {
                    required_minimum: total_min,
                    available_budget: monthly_budget,
                }),
            });
            break;
        }

        allocate_extra(
            &working,
            &mut details,
            monthly_budget - total_min,
            strategy,
        );

        for (debt, payment) in working.iter_mut().zip(details.iter_mut()) {
            debt.balance = (debt.balance - payment.total()).max(Decimal::ZERO);
            payment.balance_after = debt.balance;
        }

        plan.push(MonthlyStatement {
            month,
            details,
            total_payment: monthly_budget,
            total_balance: checked_total(working.iter().map(|d| d.balance), month)?,
            warning: None,
        });
    }

    debug!(months = plan.len(), "payoff simulation finished");
    Ok(plan)
}

/// Compounds one month of interest onto every outstanding debt.
fn accrue_interest(debts: &mut [Debt], month: u32) -> Result<(), PayoffError> {
    for debt in debts.iter_mut().filter(|d| d.is_outstanding()) {
        debt.balance = debt
            .balance
            .checked_mul(Decimal::ONE + debt.monthly_rate())
            .ok_or_else(|| PayoffError::ArithmeticOverflow {
                name: debt.name.clone(),
                month,
            })?;
    }
    Ok(())
}

fn minimum_due(debt: &Debt) -> Decimal {
    if debt.is_outstanding() {
        debt.min_payment.min(debt.balance)
    } else {
        Decimal::ZERO
    }
}

/// Hands the surplus to debts in strategy order until it runs out.
fn allocate_extra(
    debts: &[Debt],
    details: &mut [MonthlyPayment],
    mut extra: Decimal,
    strategy: Strategy,
) {
    for idx in strategy.order(debts) {
        if extra <= Decimal::ZERO {
            break;
        }
        let remaining_after_min = debts[idx].balance - details[idx].pay_min;
        if remaining_after_min <= Decimal::ZERO {
            continue;
        }
        let pay_extra = extra.min(remaining_after_min);
        details[idx].extra = pay_extra;
        extra -= pay_extra;
    }
}

fn checked_total(
    mut amounts: impl Iterator<Item = Decimal>,
    month: u32,
) -> Result<Decimal, PayoffError> {
    amounts.try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount)
            .ok_or_else(|| PayoffError::ArithmeticOverflow {
                name: "total".to_string(),
                month,
            })
    })
}
