//! Validation findings and their summary view.

use serde::{Deserialize, Serialize};

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Info => "info",
            ValidationLevel::Warning => "warning",
            ValidationLevel::Error => "error",
            ValidationLevel::Critical => "critical",
        }
    }

    /// Error and Critical findings make an item count as invalid.
    pub fn is_failing(&self) -> bool {
        matches!(self, ValidationLevel::Error | ValidationLevel::Critical)
    }
}

impl std::fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationTarget {
    /// The problem statement
    Input,
    /// A specific step, by index
    Step(usize),
    /// The whole result
    Result,
}

/// One finding from applying a validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub level: ValidationLevel,
    pub message: String,
    pub rule_name: String,
    pub target: ValidationTarget,
}

impl ValidationFinding {
    pub fn new(
        level: ValidationLevel,
        rule_name: impl Into<String>,
        message: impl Into<String>,
        target: ValidationTarget,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            rule_name: rule_name.into(),
            target,
        }
    }
}

/// Finding counts per severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LevelCounts {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub critical: usize,
}

/// Derived read-only view over a sequence of findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub validity_rate: f64,
    pub by_level: LevelCounts,
}

impl ValidationSummary {
    /// Reduce findings to counts. An item is invalid iff its level is
    /// Error or Critical. An empty set is fully valid.
    pub fn from_findings(findings: &[ValidationFinding]) -> Self {
        let mut by_level = LevelCounts::default();
        let mut invalid = 0;
        for finding in findings {
            match finding.level {
                ValidationLevel::Info => by_level.info += 1,
                ValidationLevel::Warning => by_level.warning += 1,
                ValidationLevel::Error => by_level.error += 1,
                ValidationLevel::Critical => by_level.critical += 1,
            }
            if finding.level.is_failing() {
                invalid += 1;
            }
        }
        let total = findings.len();
        let valid = total - invalid;
        let validity_rate = if total == 0 {
            1.0
        } else {
            valid as f64 / total as f64
        };
        Self {
            total,
            valid,
            invalid,
            validity_rate,
            by_level,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.invalid > 0
    }
}

impl Default for ValidationSummary {
    fn default() -> Self {
        Self::from_findings(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(level: ValidationLevel) -> ValidationFinding {
        ValidationFinding::new(level, "rule", "message", ValidationTarget::Result)
    }

    #[test]
    fn test_empty_set_is_fully_valid() {
        let summary = ValidationSummary::from_findings(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.validity_rate, 1.0);
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_counts_by_level() {
        let findings = vec![
            finding(ValidationLevel::Info),
            finding(ValidationLevel::Warning),
            finding(ValidationLevel::Error),
            finding(ValidationLevel::Critical),
        ];
        let summary = ValidationSummary::from_findings(&findings);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.validity_rate, 0.5);
        assert_eq!(summary.by_level.info, 1);
        assert_eq!(summary.by_level.critical, 1);
    }

    #[test]
    fn test_adding_error_strictly_decreases_validity_rate() {
        let mut findings = vec![
            finding(ValidationLevel::Info),
            finding(ValidationLevel::Info),
        ];
        let before = ValidationSummary::from_findings(&findings).validity_rate;
        assert_eq!(before, 1.0);

        findings.push(finding(ValidationLevel::Error));
        let after = ValidationSummary::from_findings(&findings).validity_rate;
        assert!(after < before);
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let findings = vec![finding(ValidationLevel::Warning)];
        let summary = ValidationSummary::from_findings(&findings);
        assert_eq!(summary.validity_rate, 1.0);
        assert!(!summary.has_failures());
    }
}
