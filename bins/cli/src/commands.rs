//! Command implementations, independent of argument parsing and stdout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use debtplan_core::payoff::{
    Debt, DebtLine, DebtOverview, LiabilityAccount, MonthlyStatement, PayoffCache, PlanOutcome,
    PlanSummary, SimulationInput, Strategy,
};
use debtplan_shared::{AppError, AppResult, PlannerConfig};

/// Plan document as read from disk. Unset fields fall back to
/// command-line overrides, then to configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanDocument {
    /// Debts to pay off.
    pub debts: Vec<Debt>,
    /// Monthly budget.
    #[serde(default)]
    pub monthly_budget: Option<Decimal>,
    /// Strategy label.
    #[serde(default)]
    pub strategy: Option<String>,
    /// Month cap.
    #[serde(default)]
    pub max_months: Option<u32>,
}

/// Values given on the command line; they win over the document.
#[derive(Debug, Clone, Default)]
pub struct SimulateOverrides {
    /// Monthly budget.
    pub budget: Option<Decimal>,
    /// Strategy label.
    pub strategy: Option<String>,
    /// Month cap.
    pub max_months: Option<u32>,
}

/// Output of `debtplan simulate` for one document.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Cache key of the resolved input.
    pub input_hash: String,
    /// Strategy that was applied.
    pub strategy: Strategy,
    /// Aggregate summary.
    pub summary: PlanSummary,
    /// Month-by-month schedule.
    pub schedule: Vec<MonthlyStatement>,
}

/// Output of `debtplan overview`.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewReport {
    /// Debt lines in account order.
    pub debts: Vec<DebtLine>,
    /// Sum of all amounts owed.
    pub total_debt: Decimal,
    /// Number of debt lines.
    pub debt_count: usize,
    /// Names, smallest amount first.
    pub snowball_order: Vec<String>,
    /// Names, highest rate first.
    pub avalanche_order: Vec<String>,
    /// Months to clear the total at the given budget, ignoring interest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naive_months: Option<u32>,
}

/// Parses a plan document.
pub fn parse_plan(json: &str) -> AppResult<PlanDocument> {
    serde_json::from_str(json).map_err(|e| AppError::InvalidDocument(e.to_string()))
}

/// Merges a document with overrides and configuration into a simulation input.
pub fn resolve_input(
    document: PlanDocument,
    overrides: &SimulateOverrides,
    planner: &PlannerConfig,
) -> AppResult<SimulationInput> {
    let monthly_budget = overrides
        .budget
        .or(document.monthly_budget)
        .ok_or_else(|| AppError::Validation("monthly budget is required".to_string()))?;

    let label = overrides
        .strategy
        .as_deref()
        .or(document.strategy.as_deref())
        .unwrap_or(&planner.default_strategy);

    let max_months = overrides
        .max_months
        .or(document.max_months)
        .unwrap_or(planner.max_months);

    Ok(
        SimulationInput::new(document.debts, monthly_budget, Strategy::from_label_or_default(label))
            .with_max_months(max_months),
    )
}

/// Runs one plan document through the cache.
pub fn simulate_document(
    json: &str,
    overrides: &SimulateOverrides,
    planner: &PlannerConfig,
    cache: &PayoffCache,
) -> AppResult<SimulationReport> {
    let input = resolve_input(parse_plan(json)?, overrides, planner)?;
    let result = cache.run_cached(&input)?;
    let summary = PlanSummary::from_schedule(&input.debts, &result.statements, input.max_months)?;

    match summary.outcome {
        PlanOutcome::Shortfall { month } => {
            warn!(month, "budget stops covering minimum payments");
        }
        PlanOutcome::HorizonReached { max_months } => {
            warn!(max_months, ending_balance = %summary.ending_balance, "plan does not clear the debt");
        }
        PlanOutcome::NoDebt | PlanOutcome::PaidOff { .. } => {}
    }
    info!(
        input_hash = %result.input_hash,
        cached = result.cached,
        months = summary.months,
        total_interest = %summary.total_interest,
        "payoff plan computed"
    );

    Ok(SimulationReport {
        input_hash: result.input_hash,
        strategy: input.strategy,
        summary,
        schedule: result.statements.as_ref().clone(),
    })
}

/// Builds the liability overview from a JSON list of accounts.
pub fn overview_document(json: &str, monthly_budget: Option<Decimal>) -> AppResult<OverviewReport> {
    let accounts: Vec<LiabilityAccount> =
        serde_json::from_str(json).map_err(|e| AppError::InvalidDocument(e.to_string()))?;
    let overview = DebtOverview::from_accounts(&accounts)?;

    let names = |lines: Vec<&DebtLine>| -> Vec<String> {
        lines.into_iter().map(|line| line.name.clone()).collect()
    };

    Ok(OverviewReport {
        snowball_order: names(overview.snowball_order()),
        avalanche_order: names(overview.avalanche_order()),
        naive_months: monthly_budget.and_then(|budget| overview.naive_months(budget)),
        debt_count: overview.debt_count(),
        total_debt: overview.total_debt,
        debts: overview.debts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const PLAN: &str = r#"{
        "debts": [
            {"name": "A", "balance": "500", "annual_interest_rate": "10", "min_payment": "50"},
            {"name": "B", "balance": "1000", "annual_interest_rate": "20", "min_payment": "50"}
        ],
        "monthly_budget": "200",
        "strategy": "SNOWBALL"
    }"#;

    #[test]
    fn test_document_values_used_without_overrides() {
        let input = resolve_input(
            parse_plan(PLAN).unwrap(),
            &SimulateOverrides::default(),
            &PlannerConfig::default(),
        )
        .unwrap();
        assert_eq!(input.monthly_budget, dec!(200));
        assert_eq!(input.strategy, Strategy::Snowball);
        assert_eq!(input.max_months, 120);
    }

    #[test]
    fn test_overrides_win() {
        let overrides = SimulateOverrides {
            budget: Some(dec!(300)),
            strategy: Some("avalanche".into()),
            max_months: Some(6),
        };
        let input =
            resolve_input(parse_plan(PLAN).unwrap(), &overrides, &PlannerConfig::default()).unwrap();
        assert_eq!(input.monthly_budget, dec!(300));
        assert_eq!(input.strategy, Strategy::Avalanche);
        assert_eq!(input.max_months, 6);
    }

    #[test]
    fn test_missing_budget_rejected() {
        let document = parse_plan(r#"{"debts": []}"#).unwrap();
        let err = resolve_input(document, &SimulateOverrides::default(), &PlannerConfig::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_config_strategy_used_when_unset() {
        let document = parse_plan(r#"{"debts": [], "monthly_budget": "10"}"#).unwrap();
        let planner = PlannerConfig {
            max_months: 36,
            default_strategy: "SNOWBALL".into(),
        };
        let input = resolve_input(document, &SimulateOverrides::default(), &planner).unwrap();
        assert_eq!(input.strategy, Strategy::Snowball);
        assert_eq!(input.max_months, 36);
    }

    #[test]
    fn test_simulate_document_hits_cache_on_repeat() {
        let cache = PayoffCache::new();
        let planner = PlannerConfig::default();
        let overrides = SimulateOverrides::default();

        let first = simulate_document(PLAN, &overrides, &planner, &cache).unwrap();
        assert_eq!(first.strategy, Strategy::Snowball);
        assert_eq!(first.schedule[0].details[0].extra, dec!(100));
        assert!(first.summary.outcome.is_debt_free());

        let second = simulate_document(PLAN, &overrides, &planner, &cache).unwrap();
        assert_eq!(first.input_hash, second.input_hash);
        assert_eq!(first.schedule, second.schedule);
    }

    #[test]
    fn test_negative_amount_is_validation_error() {
        let json = r#"{"debts": [{"name": "x", "balance": "-5", "annual_interest_rate": "1", "min_payment": "1"}], "monthly_budget": "10"}"#;
        let err = simulate_document(
            json,
            &SimulateOverrides::default(),
            &PlannerConfig::default(),
            &PayoffCache::new(),
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_plan("{not json").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DOCUMENT");
    }

    #[test]
    fn test_zero_month_cap_with_huge_balances_is_reported() {
        let json = r#"{
            "debts": [
                {"name": "A", "balance": "39614081257132168796771975168", "annual_interest_rate": "0", "min_payment": "0"},
                {"name": "B", "balance": "39614081257132168796771975168", "annual_interest_rate": "0", "min_payment": "0"}
            ],
            "monthly_budget": "100",
            "max_months": 0
        }"#;
        let err = simulate_document(
            json,
            &SimulateOverrides::default(),
            &PlannerConfig::default(),
            &PayoffCache::new(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "BUSINESS_RULE_VIOLATION");
    }

    #[test]
    fn test_overview_out_of_range_balance_is_reported() {
        let json = r#"[
            {"name": "Huge", "balance": "-79228162514264337593543950335", "min_payment_percent": "10"}
        ]"#;
        let err = overview_document(json, None).unwrap_err();
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_overview_document() {
        let json = r#"[
            {"name": "Card", "balance": "-1200", "interest_rate": "18", "min_payment_percent": "5"},
            {"name": "Savings", "balance": "900"},
            {"name": "Loan", "balance": "-300", "interest_rate": "7"}
        ]"#;
        let report = overview_document(json, Some(dec!(500))).unwrap();
        assert_eq!(report.debt_count, 2);
        assert_eq!(report.total_debt, dec!(1500));
        assert_eq!(report.snowball_order, vec!["Loan", "Card"]);
        assert_eq!(report.avalanche_order, vec!["Card", "Loan"]);
        assert_eq!(report.naive_months, Some(3));
        assert_eq!(report.debts[0].min_payment, Some(dec!(60.00)));
    }
}
