//! Validation rule sets.
//!
//! Three entry points: raw input, individual steps, and completed results.
//! Each applies its rules in order and returns every finding; nothing here
//! throws or short-circuits.

use super::finding::{ValidationFinding, ValidationLevel, ValidationTarget};
use crate::reasoning::entities::{ReasoningResult, ReasoningStep};

/// Tunable thresholds for the rule sets.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Input longer than this draws a Warning
    pub max_input_length: usize,
    /// Result confidence below this draws a Warning
    pub low_confidence_threshold: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_input_length: 10_000,
            low_confidence_threshold: 0.3,
        }
    }
}

/// Applies rule sets to input, steps and results.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a raw problem statement.
    pub fn validate_input(&self, problem_statement: &str) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        if problem_statement.trim().is_empty() {
            findings.push(ValidationFinding::new(
                ValidationLevel::Critical,
                "input_not_empty",
                "Problem statement is empty or whitespace-only",
                ValidationTarget::Input,
            ));
            return findings;
        }

        if problem_statement.len() > self.config.max_input_length {
            findings.push(ValidationFinding::new(
                ValidationLevel::Warning,
                "input_length",
                format!(
                    "Problem statement exceeds {} characters",
                    self.config.max_input_length
                ),
                ValidationTarget::Input,
            ));
        }

        if problem_statement.to_lowercase().contains("<script") {
            findings.push(ValidationFinding::new(
                ValidationLevel::Error,
                "input_markup",
                "Problem statement contains disallowed markup",
                ValidationTarget::Input,
            ));
        }

        findings
    }

    /// Validate a single step at `index`.
    pub fn validate_step(&self, index: usize, step: &ReasoningStep) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();
        let target = ValidationTarget::Step(index);

        if !(0.0..=1.0).contains(&step.confidence) {
            findings.push(ValidationFinding::new(
                ValidationLevel::Error,
                "step_confidence_range",
                format!("Step confidence {} is outside [0, 1]", step.confidence),
                target,
            ));
        }

        if step.description.trim().is_empty() {
            findings.push(ValidationFinding::new(
                ValidationLevel::Warning,
                "step_description_present",
                "Step has an empty description",
                target,
            ));
        }

        if step.reasoning.trim().is_empty() {
            findings.push(ValidationFinding::new(
                ValidationLevel::Warning,
                "step_reasoning_present",
                "Step has no reasoning text",
                target,
            ));
        }

        // completed_at is set iff the status is terminal
        if step.status.is_terminal() && step.completed_at.is_none() {
            findings.push(ValidationFinding::new(
                ValidationLevel::Error,
                "step_status_timestamp",
                format!("Step is {} but has no completion timestamp", step.status),
                target,
            ));
        }
        if !step.status.is_terminal() && step.completed_at.is_some() {
            findings.push(ValidationFinding::new(
                ValidationLevel::Error,
                "step_status_timestamp",
                format!("Step is {} but carries a completion timestamp", step.status),
                target,
            ));
        }

        findings
    }

    /// Validate a completed result, re-validating every contained step.
    pub fn validate_result(&self, result: &ReasoningResult) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        for (index, step) in result.steps.iter().enumerate() {
            findings.extend(self.validate_step(index, step));
        }

        if result.steps.is_empty() {
            findings.push(ValidationFinding::new(
                ValidationLevel::Error,
                "result_has_steps",
                "Result contains no steps",
                ValidationTarget::Result,
            ));
        }

        if result.completed_at.is_some() && result.final_answer.is_none() {
            findings.push(ValidationFinding::new(
                ValidationLevel::Error,
                "result_answer_on_completion",
                "Result is marked completed but has no final answer",
                ValidationTarget::Result,
            ));
        }

        if result.confidence < self.config.low_confidence_threshold {
            findings.push(ValidationFinding::new(
                ValidationLevel::Warning,
                "result_confidence",
                format!(
                    "Overall confidence {:.2} is below threshold {:.2}",
                    result.confidence, self.config.low_confidence_threshold
                ),
                ValidationTarget::Result,
            ));
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::entities::{ReasoningType, StepStatus};

    fn completed_step() -> ReasoningStep {
        let mut step = ReasoningStep::new("desc")
            .with_reasoning("why")
            .with_confidence(0.8);
        step.complete();
        step
    }

    fn rule_names(findings: &[ValidationFinding]) -> Vec<&str> {
        findings.iter().map(|f| f.rule_name.as_str()).collect()
    }

    // ==================== validate_input ====================

    #[test]
    fn test_empty_input_is_critical() {
        let findings = Validator::default().validate_input("   ");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].level, ValidationLevel::Critical);
        assert_eq!(findings[0].target, ValidationTarget::Input);
    }

    #[test]
    fn test_oversized_input_warns() {
        let validator = Validator::new(ValidationConfig {
            max_input_length: 10,
            ..Default::default()
        });
        let findings = validator.validate_input("a problem statement longer than ten chars");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].level, ValidationLevel::Warning);
    }

    #[test]
    fn test_markup_in_input_is_error() {
        let findings = Validator::default().validate_input("solve <script>x</script>");
        assert!(rule_names(&findings).contains(&"input_markup"));
        assert!(findings.iter().any(|f| f.level == ValidationLevel::Error));
    }

    #[test]
    fn test_clean_input_has_no_findings() {
        assert!(Validator::default().validate_input("Solve 2x = 4").is_empty());
    }

    // ==================== validate_step ====================

    #[test]
    fn test_valid_step_passes() {
        assert!(Validator::default()
            .validate_step(0, &completed_step())
            .is_empty());
    }

    #[test]
    fn test_confidence_out_of_range_is_error() {
        let step = completed_step().with_confidence(1.5);
        let findings = Validator::default().validate_step(0, &step);
        assert!(rule_names(&findings).contains(&"step_confidence_range"));
    }

    #[test]
    fn test_completed_without_timestamp_is_error() {
        let step = ReasoningStep {
            status: StepStatus::Completed,
            completed_at: None,
            ..completed_step()
        };
        let findings = Validator::default().validate_step(2, &step);
        assert!(findings
            .iter()
            .any(|f| f.rule_name == "step_status_timestamp"
                && f.level == ValidationLevel::Error
                && f.target == ValidationTarget::Step(2)));
    }

    #[test]
    fn test_pending_with_timestamp_is_error() {
        let step = ReasoningStep {
            status: StepStatus::Pending,
            ..completed_step()
        };
        let findings = Validator::default().validate_step(0, &step);
        assert!(rule_names(&findings).contains(&"step_status_timestamp"));
    }

    #[test]
    fn test_empty_description_and_reasoning_warn() {
        let mut step = ReasoningStep::new("");
        step.complete();
        let findings = Validator::default().validate_step(0, &step);
        assert_eq!(
            findings
                .iter()
                .filter(|f| f.level == ValidationLevel::Warning)
                .count(),
            2
        );
    }

    // ==================== validate_result ====================

    #[test]
    fn test_zero_steps_is_error() {
        let result = ReasoningResult::new("p", ReasoningType::Hybrid);
        let findings = Validator::default().validate_result(&result);
        assert!(rule_names(&findings).contains(&"result_has_steps"));
    }

    #[test]
    fn test_completed_result_without_answer_is_error() {
        let mut result = ReasoningResult::new("p", ReasoningType::Hybrid);
        result.add_step(completed_step());
        result.complete("x", 0.9);
        result.final_answer = None;
        let findings = Validator::default().validate_result(&result);
        assert!(rule_names(&findings).contains(&"result_answer_on_completion"));
    }

    #[test]
    fn test_low_confidence_warns() {
        let mut result = ReasoningResult::new("p", ReasoningType::Hybrid);
        result.add_step(completed_step());
        result.complete("answer", 0.1);
        let findings = Validator::default().validate_result(&result);
        assert!(findings
            .iter()
            .any(|f| f.rule_name == "result_confidence" && f.level == ValidationLevel::Warning));
    }

    #[test]
    fn test_steps_are_revalidated() {
        let mut result = ReasoningResult::new("p", ReasoningType::Hybrid);
        result.add_step(completed_step().with_confidence(2.0));
        result.complete("answer", 0.9);
        let findings = Validator::default().validate_result(&result);
        assert!(rule_names(&findings).contains(&"step_confidence_range"));
    }
}
