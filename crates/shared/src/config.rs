//! Application configuration management.

use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Report configuration.
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Grouping mode applied when none is requested (e.g. "cost-code-tier-1").
    #[serde(default = "default_grouping")]
    pub default_grouping: String,
    /// Quick filter applied when none is requested (e.g. "all").
    #[serde(default = "default_quick_filter")]
    pub default_quick_filter: String,
    /// Pretty-print the JSON report.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_grouping: default_grouping(),
            default_quick_filter: default_quick_filter(),
            pretty: default_pretty(),
        }
    }
}

fn default_grouping() -> String {
    "cost-code-tier-1".to_string()
}

fn default_quick_filter() -> String {
    "all".to_string()
}

fn default_pretty() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "keystone=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`](crate::AppError::Config) if a source
    /// cannot be read or a value has the wrong type.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KEYSTONE").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
