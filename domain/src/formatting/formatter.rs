//! Result formatters.
//!
//! Each formatter is a total function over any valid [`ReasoningResult`] —
//! zero steps and a missing answer render as an explicit placeholder,
//! never as empty output that could be mistaken for success.

use super::format::OutputFormat;
use crate::reasoning::entities::ReasoningResult;

/// Placeholder rendered when a result concluded without an answer.
pub const NO_ANSWER_PLACEHOLDER: &str = "(no answer)";

/// Renders a completed result into one output encoding.
pub trait ResultFormatter: Send + Sync {
    fn format(&self, result: &ReasoningResult) -> String;
}

/// Creates formatters by [`OutputFormat`].
pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(format: OutputFormat) -> Box<dyn ResultFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter),
            OutputFormat::Text => Box::new(TextFormatter),
            OutputFormat::Markdown => Box::new(MarkdownFormatter),
            OutputFormat::Structured => Box::new(StructuredFormatter),
        }
    }
}

fn answer_or_placeholder(result: &ReasoningResult) -> &str {
    result.final_answer.as_deref().unwrap_or(NO_ANSWER_PLACEHOLDER)
}

/// Field-for-field structured dump via the entity serialization contract.
pub struct JsonFormatter;

impl ResultFormatter for JsonFormatter {
    fn format(&self, result: &ReasoningResult) -> String {
        // ReasoningResult serialization is infallible (no maps with
        // non-string keys, no non-finite rejections at this level).
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Flat human-readable transcript.
pub struct TextFormatter;

impl ResultFormatter for TextFormatter {
    fn format(&self, result: &ReasoningResult) -> String {
        let mut out = String::new();
        out.push_str("REASONING RESULT\n");
        out.push_str(&format!("Problem: {}\n", result.problem_statement));
        out.push_str(&format!("Type: {}\n\n", result.reasoning_type));

        for (index, step) in result.steps.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} (confidence: {:.2})\n",
                index + 1,
                step.description,
                step.confidence
            ));
            if !step.reasoning.is_empty() {
                out.push_str(&format!("   {}\n", step.reasoning.replace('\n', "\n   ")));
            }
        }

        out.push_str(&format!("\nFinal answer: {}\n", answer_or_placeholder(result)));
        out.push_str(&format!("Overall confidence: {:.2}\n", result.confidence));
        out
    }
}

/// Transcript with markdown markup, beginning with a level-1 heading.
pub struct MarkdownFormatter;

impl ResultFormatter for MarkdownFormatter {
    fn format(&self, result: &ReasoningResult) -> String {
        let mut out = String::new();
        out.push_str("# Reasoning Result\n\n");
        out.push_str(&format!("**Problem:** {}\n\n", result.problem_statement));
        out.push_str(&format!("**Type:** {}\n\n", result.reasoning_type));
        out.push_str("## Steps\n\n");

        if result.steps.is_empty() {
            out.push_str("_No steps recorded._\n");
        }
        for (index, step) in result.steps.iter().enumerate() {
            out.push_str(&format!(
                "{}. **{}** (confidence: {:.2})\n",
                index + 1,
                step.description,
                step.confidence
            ));
            if !step.reasoning.is_empty() {
                out.push_str(&format!("   - {}\n", step.reasoning.replace('\n', " ")));
            }
        }

        out.push_str(&format!(
            "\n## Final Answer\n\n{}\n\n**Overall confidence:** {:.2}\n",
            answer_or_placeholder(result),
            result.confidence
        ));
        out
    }
}

/// Summary-oriented object with top-level `summary` and `steps` keys,
/// for a consumer that wants aggregate stats without re-deriving them.
pub struct StructuredFormatter;

impl ResultFormatter for StructuredFormatter {
    fn format(&self, result: &ReasoningResult) -> String {
        let value = serde_json::json!({
            "summary": {
                "problem_statement": result.problem_statement,
                "reasoning_type": result.reasoning_type,
                "step_count": result.step_count(),
                "average_confidence": result.average_step_confidence(),
                "confidence": result.confidence,
                "has_answer": result.final_answer.is_some(),
                "final_answer": answer_or_placeholder(result),
                "execution_time": result.execution_time,
            },
            "steps": result.steps,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::entities::{ReasoningStep, ReasoningType};

    fn solved_result() -> ReasoningResult {
        let mut result = ReasoningResult::new("Solve 2x + 3 = 7", ReasoningType::Mathematical);
        let mut step = ReasoningStep::new("Isolate x")
            .with_reasoning("Subtract 3, divide by 2")
            .with_confidence(0.9);
        step.complete();
        result.add_step(step);
        result.complete("x = 2", 0.9);
        result
    }

    fn empty_result() -> ReasoningResult {
        ReasoningResult::new("unsolved", ReasoningType::Hybrid)
    }

    #[test]
    fn test_text_transcript_shape() {
        let out = TextFormatter.format(&solved_result());
        assert!(out.starts_with("REASONING RESULT"));
        assert!(out.contains("Problem: Solve 2x + 3 = 7"));
        assert!(out.contains("1. Isolate x (confidence: 0.90)"));
        assert!(out.contains("Final answer: x = 2"));
    }

    #[test]
    fn test_markdown_starts_with_h1() {
        let out = MarkdownFormatter.format(&solved_result());
        assert!(out.starts_with("# Reasoning Result"));
        assert!(out.contains("## Steps"));
        assert!(out.contains("## Final Answer"));
    }

    #[test]
    fn test_json_is_field_for_field() {
        let result = solved_result();
        let out = JsonFormatter.format(&result);
        let back: ReasoningResult = serde_json::from_str(&out).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_structured_has_summary_and_steps() {
        let out = StructuredFormatter.format(&solved_result());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["summary"]["step_count"], 1);
        assert_eq!(value["summary"]["has_answer"], true);
        assert!(value["steps"].is_array());
    }

    #[test]
    fn test_all_formatters_total_over_empty_result() {
        let result = empty_result();
        for format in OutputFormat::all() {
            let out = FormatterFactory::create(*format).format(&result);
            assert!(!out.is_empty(), "{format} produced empty output");
        }
        // The human-readable encodings surface the placeholder explicitly.
        assert!(TextFormatter.format(&result).contains(NO_ANSWER_PLACEHOLDER));
        assert!(MarkdownFormatter.format(&result).contains(NO_ANSWER_PLACEHOLDER));
        let structured: serde_json::Value =
            serde_json::from_str(&StructuredFormatter.format(&result)).unwrap();
        assert_eq!(structured["summary"]["final_answer"], NO_ANSWER_PLACEHOLDER);
        assert_eq!(structured["summary"]["has_answer"], false);
    }
}
