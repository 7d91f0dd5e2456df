//! Shared errors and configuration for Debtplan.
//!
//! This crate provides the pieces used by every other crate:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use self::config::{AppConfig, CacheConfig, LogConfig, PlannerConfig};
pub use error::{AppError, AppResult};
