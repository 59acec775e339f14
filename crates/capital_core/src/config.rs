//! Calculator configuration.
//!
//! Loaded from a TOML file (conventionally `irb.toml`), optionally overridden
//! by `IRB_*` environment variables, then validated.
//!
//! ```toml
//! correlation_formula = "interpolated"
//! rounding = "half_even"
//! log_level = "info"
//!
//! [parallel]
//! batch_size = 64
//! parallel_threshold = 256
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::batch::ParallelConfig;
use crate::irb::{CorrelationFormula, RiskWeightCalculator, RoundingPolicy};

/// Environment variable overriding [`CalculatorConfig::correlation_formula`].
pub const ENV_CORRELATION_FORMULA: &str = "IRB_CORRELATION_FORMULA";
/// Environment variable overriding [`CalculatorConfig::rounding`].
pub const ENV_ROUNDING: &str = "IRB_ROUNDING";
/// Environment variable overriding [`CalculatorConfig::log_level`].
pub const ENV_LOG_LEVEL: &str = "IRB_LOG_LEVEL";
/// Environment variable overriding the parallel threshold.
pub const ENV_PARALLEL_THRESHOLD: &str = "IRB_PARALLEL_THRESHOLD";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error types.
///
/// # Variants
/// - `Io`: the configuration file could not be read
/// - `Parse`: the file is not valid TOML for this schema
/// - `EnvOverride`: an `IRB_*` variable holds an unusable value
/// - `Validation`: one or more fields failed [`CalculatorConfig::validate`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment override could not be applied.
    #[error("Invalid value for {variable}: {message}")]
    EnvOverride {
        /// Variable name
        variable: &'static str,
        /// Reason the value was rejected
        message: String,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Top-level calculator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Grouping of the correlation weight
    pub correlation_formula: CorrelationFormula,
    /// Rounding of the risk-weighted exposure amount
    pub rounding: RoundingPolicy,
    /// Batch parallelism
    pub parallel: ParallelConfig,
    /// Default log filter for the command-line tool
    pub log_level: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            correlation_formula: CorrelationFormula::default(),
            rounding: RoundingPolicy::default(),
            parallel: ParallelConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Self::from_toml_str(&content)
    }

    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist. Other read errors are still reported.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "configuration file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies `IRB_*` environment variable overrides.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(value) = get(ENV_CORRELATION_FORMULA) {
            self.correlation_formula =
                value
                    .trim()
                    .parse()
                    .map_err(|message| ConfigError::EnvOverride {
                        variable: ENV_CORRELATION_FORMULA,
                        message,
                    })?;
        }

        if let Some(value) = get(ENV_ROUNDING) {
            self.rounding = value
                .trim()
                .parse()
                .map_err(|message| ConfigError::EnvOverride {
                    variable: ENV_ROUNDING,
                    message,
                })?;
        }

        if let Some(value) = get(ENV_LOG_LEVEL) {
            self.log_level = value.trim().to_lowercase();
        }

        if let Some(value) = get(ENV_PARALLEL_THRESHOLD) {
            self.parallel.parallel_threshold =
                value
                    .trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::EnvOverride {
                        variable: ENV_PARALLEL_THRESHOLD,
                        message: e.to_string(),
                    })?;
        }

        Ok(self)
    }

    /// Validates the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.parallel.batch_size == 0 {
            errors.push("parallel.batch_size must be > 0".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "log_level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Calculator carrying the configured conventions.
    pub fn calculator(&self) -> RiskWeightCalculator {
        RiskWeightCalculator::new(self.correlation_formula, self.rounding)
    }
}
