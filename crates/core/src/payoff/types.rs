//! Payoff data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::strategy::Strategy;

/// Default cap on the number of simulated months (ten years).
pub const DEFAULT_MAX_MONTHS: u32 = 120;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

fn default_max_months() -> u32 {
    DEFAULT_MAX_MONTHS
}

/// A single debt as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Debt {
    /// Debt name, used to label payments.
    pub name: String,
    /// Outstanding balance.
    pub balance: Decimal,
    /// Annual interest rate in percent (e.g., 18 for 18%).
    pub annual_interest_rate: Decimal,
    /// Contractual minimum payment per month.
    pub min_payment: Decimal,
}

impl Debt {
    /// Creates a new debt.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        balance: Decimal,
        annual_interest_rate: Decimal,
        min_payment: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            balance,
            annual_interest_rate,
            min_payment,
        }
    }

    /// Monthly interest rate as a fraction (`annual / 100 / 12`).
    #[must_use]
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_interest_rate / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR
    }

    /// Returns true if anything is still owed.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        self.balance > Decimal::ZERO
    }
}

/// Parameters for one payoff simulation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Debts in caller order; the order breaks strategy ties.
    pub debts: Vec<Debt>,
    /// Total available for debt payments every month.
    pub monthly_budget: Decimal,
    /// Order in which surplus budget is allocated.
    #[serde(default)]
    pub strategy: Strategy,
    /// Hard cap on simulated months.
    #[serde(default = "default_max_months")]
    pub max_months: u32,
}

impl SimulationInput {
    /// Creates an input with the default month cap.
    #[must_use]
    pub fn new(debts: Vec<Debt>, monthly_budget: Decimal, strategy: Strategy) -> Self {
        Self {
            debts,
            monthly_budget,
            strategy,
            max_months: DEFAULT_MAX_MONTHS,
        }
    }

    /// Overrides the month cap.
    #[must_use]
    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }
}

/// Payment made towards one debt in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    /// Debt name.
    pub name: String,
    /// Minimum portion paid (capped at the balance).
    pub pay_min: Decimal,
    /// Additional payment beyond the minimum.
    pub extra: Decimal,
    /// Balance left on this debt once the month closes.
    pub balance_after: Decimal,
}

impl MonthlyPayment {
    /// Total applied to this debt in the month.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.pay_min + self.extra
    }
}

/// Emitted on the month the budget stops covering the minimum payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortfallWarning {
    /// Sum of minimum payments due that month.
    pub required_minimum: Decimal,
    /// Budget that was available.
    pub available_budget: Decimal,
}

impl ShortfallWarning {
    /// Amount missing to cover every minimum payment.
    #[must_use]
    pub fn shortfall(&self) -> Decimal {
        self.required_minimum - self.available_budget
    }
}

impl std::fmt::Display for ShortfallWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Monthly budget {} does not cover the minimum payments due ({})",
            self.available_budget, self.required_minimum
        )
    }
}

/// One month of the payoff schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStatement {
    /// 1-based month number.
    pub month: u32,
    /// Per-debt payments, in input order.
    pub details: Vec<MonthlyPayment>,
    /// Budget reported as paid this month.
    pub total_payment: Decimal,
    /// Sum of all balances at the end of the month.
    pub total_balance: Decimal,
    /// Set only on the terminating shortfall month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<ShortfallWarning>,
}

impl MonthlyStatement {
    /// Returns true if this is the terminating shortfall month.
    #[must_use]
    pub fn is_shortfall(&self) -> bool {
        self.warning.is_some()
    }

    /// Sum actually applied to debts; zero on a shortfall month.
    #[must_use]
    pub fn total_applied(&self) -> Decimal {
        if self.is_shortfall() {
            return Decimal::ZERO;
        }
        self.details.iter().map(MonthlyPayment::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        let debt = Debt::new("card", dec!(1000), dec!(12), dec!(50));
        assert_eq!(debt.monthly_rate(), dec!(0.01));

        let debt = Debt::new("loan", dec!(1000), dec!(18), dec!(50));
        assert_eq!(debt.monthly_rate(), dec!(0.015));
    }

    #[test]
    fn test_input_defaults_from_json() {
        let input: SimulationInput = serde_json::from_str(
            r#"{
                "debts": [{"name": "card", "balance": "500.00", "annual_interest_rate": "19.9", "min_payment": "25"}],
                "monthly_budget": "150"
            }"#,
        )
        .unwrap();

        assert_eq!(input.strategy, Strategy::Avalanche);
        assert_eq!(input.max_months, DEFAULT_MAX_MONTHS);
        assert_eq!(input.debts[0].balance, dec!(500.00));
    }

    #[test]
    fn test_statement_omits_absent_warning() {
        let statement = MonthlyStatement {
            month: 1,
            details: vec![],
            total_payment: dec!(100),
            total_balance: dec!(0),
            warning: None,
        };
        let json = serde_json::to_value(&statement).unwrap();
        assert!(json.get("warning").is_none());
        assert_eq!(json["total_payment"], "100");
    }

    #[test]
    fn test_shortfall_statement_applies_nothing() {
        let statement = MonthlyStatement {
            month: 3,
            details: vec![MonthlyPayment {
                name: "card".into(),
                pay_min: dec!(80),
                extra: dec!(0),
                balance_after: dec!(900),
            }],
            total_payment: dec!(50),
            total_balance: dec!(900),
            warning: Some(ShortfallWarning {
                required_minimum: dec!(80),
                available_budget: dec!(50),
            }),
        };
        assert!(statement.is_shortfall());
        assert_eq!(statement.total_applied(), Decimal::ZERO);
        assert_eq!(statement.warning.as_ref().unwrap().shortfall(), dec!(30));
        assert_eq!(
            statement.warning.unwrap().to_string(),
            "Monthly budget 50 does not cover the minimum payments due (80)"
        );
    }
}
