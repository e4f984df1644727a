//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; when loading, the ledger path can
//! be overridden with the `BETLEDGER_LEDGER` environment variable. Parsing
//! alone never reads the environment.
//!
//! # Example
//!
//! ```no_run
//! use betledger::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("betledger.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::logging::{LoggingConfig, LOG_FORMATS};
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`LedgerConfig::path`].
pub const LEDGER_PATH_ENV: &str = "BETLEDGER_LEDGER";

/// Where the ledger document lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Path to the JSON ledger file.
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ledger.json"),
        }
    }
}

/// Defaults for the hedge calculator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HedgeConfig {
    /// Exchange commission in percent used when none is given.
    pub default_commission_pct: Decimal,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            default_commission_pct: dec!(5),
        }
    }
}

/// Main application configuration.
///
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Ledger storage settings.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Hedge calculator defaults.
    #[serde(default)]
    pub hedge: HedgeConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)?.with_ledger_override(std::env::var_os(LEDGER_PATH_ENV))
    }

    /// Load configuration, falling back to defaults when the file is missing.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")?.with_ledger_override(std::env::var_os(LEDGER_PATH_ENV))
        }
    }

    /// Replace the ledger path when an override is given.
    fn with_ledger_override(mut self, path: Option<OsString>) -> Result<Self> {
        if let Some(path) = path {
            self.ledger.path = PathBuf::from(path);
            self.validate()?;
        }
        Ok(self)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.ledger.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "ledger.path",
            }
            .into());
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        let commission = self.hedge.default_commission_pct;
        if commission < Decimal::ZERO || commission >= Decimal::ONE_HUNDRED {
            return Err(ConfigError::InvalidValue {
                field: "hedge.default_commission_pct",
                reason: "must be between 0 and 100".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
