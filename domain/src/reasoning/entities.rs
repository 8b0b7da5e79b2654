//! Reasoning entities
//!
//! [`ReasoningStep`] is one unit of reasoning work; [`ReasoningResult`] is
//! the aggregate output of one reasoning invocation. Both round-trip through
//! `serde_json` field-for-field — enums as stable snake_case names,
//! timestamps as RFC 3339 UTC — so stored results can be replayed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a reasoning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step is waiting to be worked on
    #[default]
    Pending,
    /// Step is currently being worked on
    InProgress,
    /// Step finished successfully
    Completed,
    /// Step failed
    Failed,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Failed)
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of reasoning that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningType {
    Mathematical,
    Logical,
    Causal,
    #[default]
    Hybrid,
}

impl ReasoningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningType::Mathematical => "mathematical",
            ReasoningType::Logical => "logical",
            ReasoningType::Causal => "causal",
            ReasoningType::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for ReasoningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One unit of reasoning work.
///
/// Invariant: `completed_at` is set if and only if `status` is terminal.
/// The lifecycle methods maintain this; [`crate::Validator::validate_step`]
/// flags violations constructed by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// What this step does
    pub description: String,
    /// Justification text for the step
    pub reasoning: String,
    /// Self-reported confidence in [0, 1]
    pub confidence: f64,
    /// Current lifecycle status
    pub status: StepStatus,
    /// Set exactly when the step reaches a terminal status
    pub completed_at: Option<DateTime<Utc>>,
}

impl ReasoningStep {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            reasoning: String::new(),
            confidence: 0.0,
            status: StepStatus::Pending,
            completed_at: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Transition Pending -> InProgress.
    pub fn start(&mut self) {
        self.status = StepStatus::InProgress;
    }

    /// Transition to Completed, stamping the terminal timestamp.
    pub fn complete(&mut self) {
        self.status = StepStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Transition to Failed, stamping the terminal timestamp.
    pub fn fail(&mut self) {
        self.status = StepStatus::Failed;
        self.completed_at = Some(Utc::now());
    }
}

/// Aggregate output of one reasoning invocation.
///
/// Steps are append-only; `final_answer` is set only once reasoning
/// concludes. A `None` answer means "could not solve" — distinct from an
/// empty-string answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningResult {
    /// The problem this result answers
    pub problem_statement: String,
    /// Which kind of reasoning produced it
    pub reasoning_type: ReasoningType,
    /// Ordered, append-only sequence of steps
    pub steps: Vec<ReasoningStep>,
    /// The answer, present only after reasoning concluded
    pub final_answer: Option<String>,
    /// Self-reported confidence, 0 until set
    pub confidence: f64,
    /// Set when reasoning concluded
    pub completed_at: Option<DateTime<Utc>>,
    /// Elapsed wall-clock seconds
    pub execution_time: f64,
}

impl ReasoningResult {
    pub fn new(problem_statement: impl Into<String>, reasoning_type: ReasoningType) -> Self {
        Self {
            problem_statement: problem_statement.into(),
            reasoning_type,
            steps: Vec::new(),
            final_answer: None,
            confidence: 0.0,
            completed_at: None,
            execution_time: 0.0,
        }
    }

    /// Append a step. This is the only step mutator; it performs no
    /// validation — validation is a separate, explicit pass.
    pub fn add_step(&mut self, step: ReasoningStep) {
        self.steps.push(step);
    }

    /// Mark the result as concluded with an answer and confidence.
    pub fn complete(&mut self, final_answer: impl Into<String>, confidence: f64) {
        self.final_answer = Some(final_answer.into());
        self.confidence = confidence;
        self.completed_at = Some(Utc::now());
    }

    /// Mean confidence across steps, or 0 when there are none.
    pub fn average_step_confidence(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.steps.iter().map(|s| s.confidence).sum::<f64>() / self.steps.len() as f64
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// True when the result concluded without an answer.
    pub fn is_unsolved(&self) -> bool {
        self.final_answer.is_none()
    }
}
