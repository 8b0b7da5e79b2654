//! Reasoning execution parameters.

use std::time::Duration;
use stepwise_domain::ValidationConfig;

/// Tunables threaded through the reasoning pipeline.
#[derive(Debug, Clone)]
pub struct ReasoningParams {
    /// Timeout applied to every generation-engine call. After it elapses
    /// the engine resolves to a degraded result instead of hanging.
    pub engine_timeout: Duration,
    /// Thresholds for the validation rule sets.
    pub validation: ValidationConfig,
}

impl Default for ReasoningParams {
    fn default() -> Self {
        Self {
            engine_timeout: Duration::from_secs(30),
            validation: ValidationConfig::default(),
        }
    }
}

impl ReasoningParams {
    pub fn with_engine_timeout(mut self, timeout: Duration) -> Self {
        self.engine_timeout = timeout;
        self
    }

    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ReasoningParams::default();
        assert_eq!(params.engine_timeout, Duration::from_secs(30));
        assert_eq!(params.validation.low_confidence_threshold, 0.3);
    }

    #[test]
    fn test_builders() {
        let params = ReasoningParams::default().with_engine_timeout(Duration::from_secs(5));
        assert_eq!(params.engine_timeout, Duration::from_secs(5));
    }
}
