//! Parser output types.

use serde::{Deserialize, Serialize};

/// Classification of a problem statement.
///
/// `General` is the catch-all for problems no specialized rule claims; the
/// hybrid engine handles those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    Mathematical,
    Logical,
    Causal,
    #[default]
    General,
}

impl ProblemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::Mathematical => "mathematical",
            ProblemType::Logical => "logical",
            ProblemType::Causal => "causal",
            ProblemType::General => "general",
        }
    }
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured information extracted from a problem statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProblemProfile {
    pub problem_type: ProblemType,
    /// All numeric literals, in order of appearance
    pub numbers: Vec<f64>,
    /// Matches from the fixed domain vocabulary, in vocabulary order
    pub keywords: Vec<String>,
}

/// One step-shaped record extracted from an engine trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStep {
    pub description: String,
    pub reasoning: String,
    pub confidence: f64,
}

/// What a parse produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseData {
    Problem(ProblemProfile),
    Steps(Vec<ParsedStep>),
}

/// Outcome of a parse. `error_message` is present iff `success` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub success: bool,
    pub data: Option<ParseData>,
    pub error_message: Option<String>,
}

impl ParseResult {
    pub fn ok(data: ParseData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error_message: Some(message.into()),
        }
    }

    /// The extracted problem profile, if this was a successful problem parse.
    pub fn problem(&self) -> Option<&ProblemProfile> {
        match &self.data {
            Some(ParseData::Problem(profile)) => Some(profile),
            _ => None,
        }
    }

    /// The extracted steps, if this was a successful step parse.
    pub fn steps(&self) -> Option<&[ParsedStep]> {
        match &self.data {
            Some(ParseData::Steps(steps)) => Some(steps),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_carries_message_and_no_data() {
        let result = ParseResult::failure("empty input");
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some("empty input"));
        assert!(result.data.is_none());
        assert!(result.problem().is_none());
        assert!(result.steps().is_none());
    }

    #[test]
    fn test_ok_accessors_match_variant() {
        let result = ParseResult::ok(ParseData::Problem(ProblemProfile::default()));
        assert!(result.success);
        assert!(result.problem().is_some());
        assert!(result.steps().is_none());
    }
}
