//! Month-by-month debt payoff projections.

pub mod cache;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod overview;
pub mod strategy;
pub mod types;
pub mod validation;


pub use cache::{CachedSchedule, PayoffCache};
pub use engine::{PayoffEngine, simulate};
pub use error::PayoffError;
pub use outcome::{DebtPayoff, PlanOutcome, PlanSummary};
pub use overview::{DebtLine, DebtOverview, LiabilityAccount};
pub use strategy::Strategy;
pub use types::{
    DEFAULT_MAX_MONTHS, Debt, MonthlyPayment, MonthlyStatement, ShortfallWarning, SimulationInput,
};
pub use validation::validate_input;
