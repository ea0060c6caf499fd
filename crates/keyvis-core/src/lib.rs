//! Shared domain model and configuration for the keyvis workspace.
//!
//! Holds the topic/keyword/engine-stats types that round-trip through the
//! `/analyze` endpoint, plus application configuration loaded from the
//! environment.

mod app_config;
mod config;
mod topics;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use topics::{EngineStats, HistoryPoint, Intent, KeywordWithIntent, Topic};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
