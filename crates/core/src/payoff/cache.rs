//! Payoff schedule caching using Moka.
//!
//! Provides in-memory caching for payoff schedules to avoid
//! redundant computations when the same inputs are submitted.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

use debtplan_shared::CacheConfig;

use super::engine::PayoffEngine;
use super::error::PayoffError;
use super::types::{MonthlyStatement, SimulationInput};

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 100;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// A schedule together with its cache metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSchedule {
    /// Hash of the input the schedule was computed from.
    pub input_hash: String,
    /// The payoff schedule.
    pub statements: Arc<Vec<MonthlyStatement>>,
    /// Whether this schedule was returned from cache.
    pub cached: bool,
}

/// Cache for payoff schedules.
///
/// Uses the input hash as the cache key. Thread-safe and suitable for
/// concurrent access.
#[derive(Clone)]
pub struct PayoffCache {
    cache: Cache<String, Arc<Vec<MonthlyStatement>>>,
}

impl PayoffCache {
    /// Creates a new payoff cache with default settings.
    ///
    /// Default: 100 entries max, 5 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a new payoff cache with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of entries to cache
    /// * `ttl_secs` - Time-to-live in seconds for each entry
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Creates a cache from the application configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_config(config.max_capacity, config.ttl_secs)
    }

    /// Runs a simulation, returning the cached schedule if available.
    ///
    /// Failed simulations are not cached. Inputs that differ only in decimal
    /// scale (`200` and `200.00`) share one entry, so a hit returns amounts
    /// equal in value to a fresh run but written with the scale of the input
    /// that filled the entry.
    ///
    /// # Errors
    ///
    /// Propagates validation and overflow errors from [`PayoffEngine::run`].
    pub fn run_cached(&self, input: &SimulationInput) -> Result<CachedSchedule, PayoffError> {
        let input_hash = PayoffEngine::hash_input(input);

        if let Some(statements) = self.cache.get(&input_hash) {
            return Ok(CachedSchedule {
                input_hash,
                statements,
                cached: true,
            });
        }

        let statements = Arc::new(PayoffEngine::run(input)?);
        self.cache.insert(input_hash.clone(), Arc::clone(&statements));

        Ok(CachedSchedule {
            input_hash,
            statements,
            cached: false,
        })
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Invalidates the entry for a specific input.
    pub fn invalidate(&self, input: &SimulationInput) {
        self.cache.invalidate(&PayoffEngine::hash_input(input));
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    ///
    /// Moka handles this in the background; calling it makes
    /// `entry_count` and invalidations observable immediately.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for PayoffCache {
    fn default() -> Self {
        Self::new()
    }
}
