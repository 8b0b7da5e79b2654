//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use stepwise_application::config::ReasoningParams;
use stepwise_domain::{OutputFormat, ValidationConfig};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generation engine settings
    pub engine: FileEngineConfig,
    /// Validation thresholds
    pub validation: FileValidationConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Derive the application-layer parameters from the raw file values.
    pub fn reasoning_params(&self) -> ReasoningParams {
        ReasoningParams::default()
            .with_engine_timeout(Duration::from_secs(self.engine.timeout_secs))
            .with_validation(ValidationConfig {
                max_input_length: self.validation.max_input_length,
                low_confidence_threshold: self.validation.low_confidence_threshold,
            })
    }
}

/// Raw engine configuration from TOML (`[engine]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Which gateway to use: "scripted" or "http"
    pub kind: String,
    /// Generate endpoint URL (http engine only)
    pub endpoint: String,
    /// Model name passed to the engine (http engine only)
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            kind: "scripted".to_string(),
            endpoint: "http://localhost:11434/api/generate".to_string(),
            model: "llama3".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Raw validation configuration from TOML (`[validation]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileValidationConfig {
    pub max_input_length: usize,
    pub low_confidence_threshold: f64,
}

impl Default for FileValidationConfig {
    fn default() -> Self {
        let defaults = ValidationConfig::default();
        Self {
            max_input_length: defaults.max_input_length,
            low_confidence_threshold: defaults.low_confidence_threshold,
        }
    }
}

/// Raw output configuration from TOML (`[output]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses the domain type); `None` defers to the CLI flag
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}
