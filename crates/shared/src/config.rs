//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Payoff planner defaults.
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Simulation result cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Defaults applied when a request leaves a planner parameter unset.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    /// Hard cap on simulated months.
    #[serde(default = "default_max_months")]
    pub max_months: u32,
    /// Strategy label used when none is supplied.
    #[serde(default = "default_strategy")]
    pub default_strategy: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_months: default_max_months(),
            default_strategy: default_strategy(),
        }
    }
}

fn default_max_months() -> u32 {
    120
}

fn default_strategy() -> String {
    "AVALANCHE".to_string()
}

/// Simulation result cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached schedules.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live in seconds for each entry.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_max_capacity() -> u64 {
    100
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "debtplan=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DEBTPLAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
