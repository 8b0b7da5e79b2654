//! Step trace parsing.
//!
//! Splits a free-text engine trace into step-shaped records by scanning for
//! `Step N: <description>` headers. Body lines up to the next header become
//! the step's `reasoning`; an optional trailing `Confidence: <float>` line
//! terminates the step. Text before the first recognized header is
//! discarded.

use super::outcome::{ParseData, ParseResult, ParsedStep};
use regex::Regex;
use std::sync::LazyLock;

static STEP_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*step\s+\d+\s*[:.)]\s*(.*)$").expect("valid header pattern")
});

static CONFIDENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*confidence\s*[:=]\s*(\S+)\s*$").expect("valid confidence pattern")
});

/// Confidence assigned when the line is absent or unparsable.
pub const DEFAULT_STEP_CONFIDENCE: f64 = 0.5;

/// Parses a free-text step-by-step trace into [`ParsedStep`] records.
///
/// Fails only when zero steps are recognized.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepOutputParser;

struct StepBuilder {
    description: String,
    body: Vec<String>,
    confidence: f64,
}

impl StepBuilder {
    fn new(description: String) -> Self {
        Self {
            description,
            body: Vec::new(),
            confidence: DEFAULT_STEP_CONFIDENCE,
        }
    }

    fn finish(self) -> ParsedStep {
        ParsedStep {
            description: self.description,
            reasoning: self.body.join("\n").trim().to_string(),
            confidence: self.confidence,
        }
    }
}

impl StepOutputParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str) -> ParseResult {
        let mut steps: Vec<ParsedStep> = Vec::new();
        let mut current: Option<StepBuilder> = None;

        for line in text.lines() {
            if let Some(captures) = STEP_HEADER_RE.captures(line) {
                if let Some(done) = current.take() {
                    steps.push(done.finish());
                }
                current = Some(StepBuilder::new(captures[1].trim().to_string()));
            } else if let Some(builder) = current.as_mut() {
                if let Some(captures) = CONFIDENCE_RE.captures(line) {
                    builder.confidence = captures[1]
                        .parse::<f64>()
                        .map(|c| c.clamp(0.0, 1.0))
                        .unwrap_or(DEFAULT_STEP_CONFIDENCE);
                    if let Some(done) = current.take() {
                        steps.push(done.finish());
                    }
                } else {
                    builder.body.push(line.to_string());
                }
            }
            // Lines before the first header are discarded.
        }

        if let Some(done) = current.take() {
            steps.push(done.finish());
        }

        if steps.is_empty() {
            return ParseResult::failure("No steps recognized in text");
        }
        ParseResult::ok(ParseData::Steps(steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_steps(text: &str) -> Vec<ParsedStep> {
        StepOutputParser::new()
            .parse(text)
            .steps()
            .expect("parse should succeed")
            .to_vec()
    }

    #[test]
    fn test_three_steps_with_confidences() {
        let trace = "\
Let me work through this.
Step 1: Understand the problem
We need to find x such that 2x + 3 = 7.
Confidence: 0.9
Step 2: Isolate x
Subtract 3, divide by 2.
Confidence: 0.9
Step 3: Verify
2 * 2 + 3 = 7 holds.
Confidence: 0.9
";
        let steps = parse_steps(trace);
        assert_eq!(steps.len(), 3);
        for step in &steps {
            assert_eq!(step.confidence, 0.9);
        }
        assert_eq!(steps[0].description, "Understand the problem");
        assert_eq!(steps[1].reasoning, "Subtract 3, divide by 2.");
    }

    #[test]
    fn test_preamble_is_discarded() {
        let steps = parse_steps("chatter before\nStep 1: Only step\nbody line\n");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].reasoning, "body line");
    }

    #[test]
    fn test_missing_confidence_defaults() {
        let steps = parse_steps("Step 1: No confidence line\nsome reasoning");
        assert_eq!(steps[0].confidence, DEFAULT_STEP_CONFIDENCE);
    }

    #[test]
    fn test_unparsable_confidence_defaults() {
        let steps = parse_steps("Step 1: Odd\nbody\nConfidence: high\n");
        assert_eq!(steps[0].confidence, DEFAULT_STEP_CONFIDENCE);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let steps = parse_steps("Step 1: Over\nbody\nConfidence: 1.7\n");
        assert_eq!(steps[0].confidence, 1.0);
    }

    #[test]
    fn test_adjacent_headers_give_empty_reasoning() {
        let steps = parse_steps("Step 1: First\nStep 2: Second\nbody for second\n");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].reasoning, "");
        assert_eq!(steps[1].reasoning, "body for second");
    }

    #[test]
    fn test_header_variants() {
        let steps = parse_steps("step 1. lowercase dot\nStep 2) parenthesis\n");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].description, "lowercase dot");
        assert_eq!(steps[1].description, "parenthesis");
    }

    #[test]
    fn test_multiline_body_joined_with_newlines() {
        let steps = parse_steps("Step 1: Multi\nfirst line\nsecond line\n");
        assert_eq!(steps[0].reasoning, "first line\nsecond line");
    }

    #[test]
    fn test_no_steps_is_a_failure_value() {
        let result = StepOutputParser::new().parse("just prose, no structure");
        assert!(!result.success);
        assert!(result.error_message.unwrap().contains("No steps"));
    }
}
