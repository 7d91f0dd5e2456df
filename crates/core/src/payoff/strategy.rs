//! Surplus allocation strategies.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::PayoffError;
use super::types::Debt;

/// Order in which surplus budget is sent to debts.
///
/// Deserializing accepts any label: unknown labels resolve to
/// [`Strategy::DEFAULT`] through [`Strategy::from_label_or_default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Strategy {
    /// Highest interest rate first.
    #[default]
    Avalanche,
    /// Smallest balance first.
    Snowball,
}

impl Strategy {
    /// Strategy used for missing or unrecognized labels.
    pub const DEFAULT: Self = Self::Avalanche;

    /// Canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avalanche => "AVALANCHE",
            Self::Snowball => "SNOWBALL",
        }
    }

    /// Parses a label, falling back to [`Strategy::DEFAULT`] when it is not recognized.
    #[must_use]
    pub fn from_label_or_default(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            warn!(label, default = Self::DEFAULT.as_str(), "unrecognized payoff strategy");
            Self::DEFAULT
        })
    }

    /// Returns debt indices in the order surplus should be allocated.
    ///
    /// Both orderings are stable: ties keep the input order.
    #[must_use]
    pub fn order(self, debts: &[Debt]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..debts.len()).collect();
        match self {
            Self::Avalanche => indices.sort_by(|&a, &b| {
                debts[b]
                    .annual_interest_rate
                    .cmp(&debts[a].annual_interest_rate)
            }),
            Self::Snowball => indices.sort_by_key(|&i| debts[i].balance),
        }
        indices
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = PayoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AVALANCHE" => Ok(Self::Avalanche),
            "SNOWBALL" => Ok(Self::Snowball),
            _ => Err(PayoffError::UnrecognizedStrategy(s.to_string())),
        }
    }
}

impl From<String> for Strategy {
    fn from(label: String) -> Self {
        Self::from_label_or_default(&label)
    }
}
