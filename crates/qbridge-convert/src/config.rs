//! Conversion settings.
//!
//! Settings come from, highest precedence first:
//! 1. Environment variables with the `QBRIDGE_` prefix
//! 2. A YAML configuration file
//! 3. Default values
//!
//! Command-line flags are applied by the caller after loading.

use std::path::Path;

use qbridge_adapter_braket::ImportOptions;
use qbridge_ir::equivalence::{DEFAULT_TOLERANCE, EquivalenceOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid YAML for this schema.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Complete conversion configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionConfig {
    /// How Braket circuits are read and written.
    #[serde(default)]
    pub braket: BraketConfig,

    /// How round trips are compared.
    #[serde(default)]
    pub equivalence: EquivalenceConfig,
}

/// Braket-side settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BraketConfig {
    /// Measure every qubit when a Braket circuit has no result types.
    #[serde(default = "default_true")]
    pub implicit_measure_all: bool,

    /// Fail on result types that have no measurement counterpart.
    #[serde(default = "default_true")]
    pub strict_result_types: bool,

    /// Wrap converted Braket circuits in a verbatim box.
    #[serde(default)]
    pub verbatim: bool,
}

/// Equivalence-check settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EquivalenceConfig {
    /// Absolute tolerance for numeric parameters.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Compare instruction order instead of DAG layers.
    #[serde(default)]
    pub strict_order: bool,

    /// Drop barriers before comparing.
    #[serde(default = "default_true")]
    pub ignore_barriers: bool,
}

fn default_true() -> bool {
    true
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Default for BraketConfig {
    fn default() -> Self {
        Self {
            implicit_measure_all: true,
            strict_result_types: true,
            verbatim: false,
        }
    }
}

impl Default for EquivalenceConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            strict_order: false,
            ignore_barriers: true,
        }
    }
}

impl ConversionConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loaded configuration file");
        Self::from_yaml(&contents)
    }

    /// Load configuration from an optional file, then apply environment
    /// overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply `QBRIDGE_*` environment variables.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    ///
    /// Variables that are absent leave the field unchanged; values that do
    /// not parse are ignored with a warning.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str, field: &mut bool| {
            if let Some(v) = lookup(key) {
                match parse_bool(&v) {
                    Some(b) => *field = b,
                    None => warn!(key, value = %v, "ignoring non-boolean override"),
                }
            }
        };

        flag("QBRIDGE_IMPLICIT_MEASURE_ALL", &mut self.braket.implicit_measure_all);
        flag("QBRIDGE_STRICT_RESULT_TYPES", &mut self.braket.strict_result_types);
        flag("QBRIDGE_VERBATIM", &mut self.braket.verbatim);
        flag("QBRIDGE_STRICT_ORDER", &mut self.equivalence.strict_order);
        flag("QBRIDGE_IGNORE_BARRIERS", &mut self.equivalence.ignore_barriers);

        if let Some(v) = lookup("QBRIDGE_TOLERANCE") {
            match v.parse() {
                Ok(tol) => self.equivalence.tolerance = tol,
                Err(_) => warn!(value = %v, "ignoring non-numeric QBRIDGE_TOLERANCE"),
            }
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tol = self.equivalence.tolerance;
        if !tol.is_finite() || tol < 0.0 {
            return Err(ConfigError::Validation(format!(
                "tolerance must be a non-negative number, got {tol}"
            )));
        }
        if tol >= 1.0 {
            return Err(ConfigError::Validation(format!(
                "tolerance must be below 1, got {tol}"
            )));
        }
        Ok(())
    }

    /// Options for importing Braket circuits.
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            implicit_measure_all: self.braket.implicit_measure_all,
            strict_result_types: self.braket.strict_result_types,
        }
    }

    /// Options for the equivalence checker.
    pub fn equivalence_options(&self) -> EquivalenceOptions {
        EquivalenceOptions {
            tolerance: self.equivalence.tolerance,
            strict_order: self.equivalence.strict_order,
            ignore_barriers: self.equivalence.ignore_barriers,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
