//! Prompt templates for the reasoning engines.
//!
//! Each engine flavors the same step-by-step contract: the generation
//! engine is asked to emit `Step N:` blocks, per-step `Confidence:` lines
//! and a final `Answer:` line, which is exactly what
//! [`crate::StepOutputParser`] recognizes on the way back.

use crate::parsing::outcome::ProblemType;

const OUTPUT_CONTRACT: &str = "\
Work through the problem in numbered steps. For each step write:
Step N: <short description>
<reasoning for the step>
Confidence: <value between 0 and 1>

Finish with a single line:
Answer: <the final answer>";

fn flavor_instruction(problem_type: ProblemType) -> &'static str {
    match problem_type {
        ProblemType::Mathematical => {
            "Solve the following mathematical problem. Show every manipulation."
        }
        ProblemType::Logical => {
            "Analyze the following logical problem. Make each inference explicit."
        }
        ProblemType::Causal => {
            "Explain the causal structure of the following problem. Trace cause to effect."
        }
        ProblemType::General => "Reason carefully about the following problem.",
    }
}

/// Build the step-by-step prompt for a problem of the given type.
pub fn step_prompt(problem_type: ProblemType, problem_statement: &str) -> String {
    format!(
        "{}\n\n{}\n\nProblem: {}",
        flavor_instruction(problem_type),
        OUTPUT_CONTRACT,
        problem_statement
    )
}
