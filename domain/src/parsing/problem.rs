//! Problem statement parsing.
//!
//! Classification is an explicit ordered rule table — the first matching
//! rule wins, and each rule is independently testable — rather than a nest
//! of conditionals. Alongside the classification, the parser extracts every
//! numeric literal (in order) and matches against a fixed keyword
//! vocabulary.

use super::outcome::{ParseData, ParseResult, ProblemProfile, ProblemType};
use regex::Regex;
use std::sync::LazyLock;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid number pattern"));

/// Fixed vocabulary scanned for `keywords`. Order here is output order.
const KEYWORD_VOCABULARY: &[&str] = &[
    "solve",
    "calculate",
    "compute",
    "simplify",
    "equation",
    "area",
    "volume",
    "derivative",
    "integral",
    "prove",
    "deduce",
    "conclude",
    "cause",
    "effect",
    "explain",
    "compare",
];

/// What a classification rule sees: the lowercased text plus the numbers
/// already extracted from it.
pub struct RuleInput<'a> {
    pub text: &'a str,
    pub numbers: &'a [f64],
}

/// One entry in the ordered classification table.
pub struct ClassificationRule {
    pub name: &'static str,
    pub problem_type: ProblemType,
    matcher: fn(&RuleInput) -> bool,
}

impl ClassificationRule {
    pub fn matches(&self, input: &RuleInput) -> bool {
        (self.matcher)(input)
    }
}

fn matches_mathematical(input: &RuleInput) -> bool {
    let has_operator = input.text.contains('=')
        || input.text.contains('+')
        || input.text.contains('*')
        || input.text.contains('/')
        || input.text.contains('^')
        || input.text.contains('%')
        || input.text.contains(" - ");
    (has_operator && !input.numbers.is_empty()) || input.numbers.len() >= 2
}

fn matches_logical(input: &RuleInput) -> bool {
    let quantifier = ["all ", "some ", "no ", "every ", "none of"]
        .iter()
        .any(|q| input.text.contains(q));
    let conditional = (input.text.contains("if ") && input.text.contains("then"))
        || input.text.contains("implies")
        || input.text.contains("therefore");
    quantifier || conditional
}

fn matches_causal(input: &RuleInput) -> bool {
    [
        "because",
        "causes",
        "caused by",
        "leads to",
        "results in",
        "due to",
        "effect of",
        "why ",
    ]
    .iter()
    .any(|c| input.text.contains(c))
}

/// The classification table, in precedence order. The first rule whose
/// matcher returns true decides the problem type; no rule matching means
/// [`ProblemType::General`].
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "operators_and_numbers",
        problem_type: ProblemType::Mathematical,
        matcher: matches_mathematical,
    },
    ClassificationRule {
        name: "quantifiers_and_conditionals",
        problem_type: ProblemType::Logical,
        matcher: matches_logical,
    },
    ClassificationRule {
        name: "causal_connectives",
        problem_type: ProblemType::Causal,
        matcher: matches_causal,
    },
];

/// Extracts structure from an incoming problem statement.
///
/// Always succeeds unless the input is empty or whitespace-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemStatementParser;

impl ProblemStatementParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str) -> ParseResult {
        if text.trim().is_empty() {
            return ParseResult::failure("Problem statement is empty");
        }

        let numbers = extract_numbers(text);
        let lowered = text.to_lowercase();
        let input = RuleInput {
            text: &lowered,
            numbers: &numbers,
        };

        let problem_type = CLASSIFICATION_RULES
            .iter()
            .find(|rule| rule.matches(&input))
            .map(|rule| rule.problem_type)
            .unwrap_or(ProblemType::General);

        let keywords = KEYWORD_VOCABULARY
            .iter()
            .filter(|k| lowered.contains(*k))
            .map(|k| k.to_string())
            .collect();

        ParseResult::ok(ParseData::Problem(ProblemProfile {
            problem_type,
            numbers,
            keywords,
        }))
    }
}

/// All numeric literals in `text`, preserving order of appearance.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> ProblemType {
        ProblemStatementParser::new()
            .parse(text)
            .problem()
            .expect("parse should succeed")
            .problem_type
    }

    // ==================== Classification ====================

    #[test]
    fn test_equation_is_mathematical() {
        let parser = ProblemStatementParser::new();
        let result = parser.parse("Solve 2x + 3 = 7");
        let profile = result.problem().unwrap();
        assert_eq!(profile.problem_type, ProblemType::Mathematical);
        assert_eq!(profile.numbers, vec![2.0, 3.0, 7.0]);
        assert!(profile.keywords.contains(&"solve".to_string()));
    }

    #[test]
    fn test_quantified_statement_is_logical() {
        assert_eq!(
            classify("All humans are mortal. Socrates is a human. Is Socrates mortal?"),
            ProblemType::Logical
        );
        assert_eq!(
            classify("If it rains then the ground gets wet. It rains. What follows?"),
            ProblemType::Logical
        );
    }

    #[test]
    fn test_causal_connective_is_causal() {
        assert_eq!(
            classify("Why does ice float on water?"),
            ProblemType::Causal
        );
        assert_eq!(
            classify("Smoking leads to health problems. Explain the mechanism."),
            ProblemType::Causal
        );
    }

    #[test]
    fn test_unclaimed_text_is_general() {
        assert_eq!(
            classify("Describe your favorite book."),
            ProblemType::General
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Contains both an equation and a causal connective; the
        // mathematical rule precedes the causal rule in the table.
        assert_eq!(
            classify("Because x + 1 = 2, what is x?"),
            ProblemType::Mathematical
        );
    }

    #[test]
    fn test_rules_are_individually_testable() {
        let numbers = vec![3.0, 4.0];
        let input = RuleInput {
            text: "what is 3 * 4?",
            numbers: &numbers,
        };
        assert!(CLASSIFICATION_RULES[0].matches(&input));
        assert!(!CLASSIFICATION_RULES[1].matches(&input));
        assert!(!CLASSIFICATION_RULES[2].matches(&input));
    }

    // ==================== Extraction ====================

    #[test]
    fn test_extract_numbers_preserves_order() {
        assert_eq!(extract_numbers("add 10 to -2.5 and 7"), vec![10.0, -2.5, 7.0]);
        assert!(extract_numbers("no digits here").is_empty());
    }

    #[test]
    fn test_keywords_scan_fixed_vocabulary() {
        let parser = ProblemStatementParser::new();
        let result = parser.parse("Calculate the area and the derivative of f");
        let profile = result.problem().unwrap();
        assert_eq!(profile.keywords, vec!["calculate", "area", "derivative"]);
    }

    // ==================== Failure ====================

    #[test]
    fn test_empty_input_fails_with_message() {
        let parser = ProblemStatementParser::new();
        let result = parser.parse("   \n\t ");
        assert!(!result.success);
        assert!(result.error_message.unwrap().contains("empty"));
    }
}
