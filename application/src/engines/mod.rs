//! Reasoning engines.
//!
//! Each engine turns a problem statement into a [`ReasoningResult`] by
//! prompting the generation engine for a step-by-step trace and parsing it
//! back into structured steps. Engine selection is tagged-variant dispatch:
//! [`EngineKind::select`] maps the classified problem type to an engine,
//! falling back to the hybrid engine — never duck-typed polling, so two
//! engines can't silently both claim a problem.

pub mod causal;
pub mod hybrid;
pub mod logical;
pub mod mathematical;

use crate::config::ReasoningParams;
use crate::ports::generation_gateway::GenerationGateway;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use stepwise_domain::{
    DomainError, ProblemProfile, ProblemType, ReasoningResult, ReasoningStep, ReasoningType,
    StepOutputParser, prompt,
};
use tracing::{debug, warn};

/// The engine kinds available for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Mathematical,
    Logical,
    Causal,
    Hybrid,
}

impl EngineKind {
    /// Explicit selection: map the classified problem type to an engine,
    /// defaulting to the hybrid engine when no specialized engine claims
    /// the problem.
    pub fn select(profile: &ProblemProfile) -> Self {
        match profile.problem_type {
            ProblemType::Mathematical => EngineKind::Mathematical,
            ProblemType::Logical => EngineKind::Logical,
            ProblemType::Causal => EngineKind::Causal,
            ProblemType::General => EngineKind::Hybrid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Mathematical => "mathematical",
            EngineKind::Logical => "logical",
            EngineKind::Causal => "causal",
            EngineKind::Hybrid => "hybrid",
        }
    }

    /// The reasoning type results from this engine carry.
    pub fn reasoning_type(&self) -> ReasoningType {
        match self {
            EngineKind::Mathematical => ReasoningType::Mathematical,
            EngineKind::Logical => ReasoningType::Logical,
            EngineKind::Causal => ReasoningType::Causal,
            EngineKind::Hybrid => ReasoningType::Hybrid,
        }
    }

    /// The prompt flavor this engine uses.
    pub fn problem_type(&self) -> ProblemType {
        match self {
            EngineKind::Mathematical => ProblemType::Mathematical,
            EngineKind::Logical => ProblemType::Logical,
            EngineKind::Causal => ProblemType::Causal,
            EngineKind::Hybrid => ProblemType::General,
        }
    }
}

impl std::str::FromStr for EngineKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mathematical" | "math" => Ok(EngineKind::Mathematical),
            "logical" => Ok(EngineKind::Logical),
            "causal" => Ok(EngineKind::Causal),
            "hybrid" => Ok(EngineKind::Hybrid),
            other => Err(DomainError::UnknownParser(format!("engine {other}"))),
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A strategy that turns a problem statement into justified steps and a
/// final answer.
///
/// `reason` is infallible at the type level: engine failures degrade the
/// result (`final_answer: None`, zero confidence) instead of propagating
/// past the pipeline boundary. Callers treat an absent answer as "could
/// not solve", not as an exception.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    fn kind(&self) -> EngineKind;

    /// Whether this engine claims the problem.
    fn can_handle(&self, problem_statement: &str) -> bool;

    async fn reason(&self, problem_statement: &str) -> ReasoningResult;
}

/// Construct the engine for a dispatch decision.
pub fn build_engine(
    kind: EngineKind,
    gateway: Arc<dyn GenerationGateway>,
    params: ReasoningParams,
) -> Box<dyn ReasoningEngine> {
    match kind {
        EngineKind::Mathematical => Box::new(mathematical::MathematicalEngine::new(gateway, params)),
        EngineKind::Logical => Box::new(logical::LogicalEngine::new(gateway, params)),
        EngineKind::Causal => Box::new(causal::CausalEngine::new(gateway, params)),
        EngineKind::Hybrid => Box::new(hybrid::HybridEngine::new(gateway, params)),
    }
}

/// Shared reasoning flow used by every concrete engine: prompt the
/// generation engine under a timeout, parse the trace into steps, extract
/// the final answer. Failures produce a degraded result.
pub(crate) async fn run_generation(
    gateway: &dyn GenerationGateway,
    params: &ReasoningParams,
    kind: EngineKind,
    problem_statement: &str,
) -> ReasoningResult {
    let started = Instant::now();
    let mut result = ReasoningResult::new(problem_statement, kind.reasoning_type());
    let prompt = prompt::step_prompt(kind.problem_type(), problem_statement);

    match tokio::time::timeout(params.engine_timeout, gateway.complete(&prompt)).await {
        Ok(Ok(text)) => {
            debug!(engine = kind.as_str(), bytes = text.len(), "generation completed");
            populate_from_trace(&mut result, &text);
        }
        Ok(Err(e)) => {
            warn!(engine = kind.as_str(), "generation call failed: {e}");
        }
        Err(_) => {
            warn!(
                engine = kind.as_str(),
                "generation call timed out after {:?}", params.engine_timeout
            );
        }
    }

    result.execution_time = started.elapsed().as_secs_f64();
    result
}

/// Fill a result from a free-text trace: steps via [`StepOutputParser`]
/// with the full Pending -> InProgress -> Completed lifecycle, then the
/// answer line. A trace with no recognizable structure leaves the result
/// unsolved.
pub(crate) fn populate_from_trace(result: &mut ReasoningResult, text: &str) {
    let parsed = StepOutputParser::new().parse(text);
    if let Some(steps) = parsed.steps() {
        for parsed_step in steps {
            let mut step = ReasoningStep::new(&parsed_step.description)
                .with_reasoning(&parsed_step.reasoning)
                .with_confidence(parsed_step.confidence);
            step.start();
            step.complete();
            result.add_step(step);
        }
    }

    let answer = extract_answer(text).or_else(|| {
        result.steps.last().map(|step| {
            if step.reasoning.is_empty() {
                step.description.clone()
            } else {
                step.reasoning.clone()
            }
        })
    });

    if let Some(answer) = answer {
        let confidence = result.average_step_confidence();
        result.complete(answer, confidence);
    }
}

/// Extract the `Answer:` / `Final answer:` line from a trace, last
/// occurrence winning.
pub(crate) fn extract_answer(text: &str) -> Option<String> {
    let mut answer = None;
    for line in text.lines() {
        let lowered = line.trim_start().to_lowercase();
        for prefix in ["final answer:", "answer:"] {
            if lowered.starts_with(prefix) {
                let rest = line.trim_start()[prefix.len()..].trim();
                if !rest.is_empty() {
                    answer = Some(rest.to_string());
                }
                break;
            }
        }
    }
    answer
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ports::generation_gateway::GatewayError;
    use std::sync::Mutex;

    /// Gateway that replays canned responses, or fails on demand.
    pub struct MockGateway {
        responses: Mutex<Vec<Result<String, GatewayError>>>,
    }

    impl MockGateway {
        pub fn replying(text: &str) -> Self {
            Self {
                responses: Mutex::new(vec![Ok(text.to_string())]),
            }
        }

        pub fn failing() -> Self {
            Self {
                responses: Mutex::new(vec![Err(GatewayError::RequestFailed(
                    "engine down".to_string(),
                ))]),
            }
        }
    }

    #[async_trait]
    impl GenerationGateway for MockGateway {
        async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
            self.responses
                .lock()
                .expect("mock lock")
                .pop()
                .unwrap_or_else(|| Err(GatewayError::Other("no more responses".to_string())))
        }
    }

    pub const SAMPLE_TRACE: &str = "\
Step 1: Understand the problem
We need x with 2x + 3 = 7.
Confidence: 0.9
Step 2: Solve
Subtract 3 and divide by 2, so x = 2.
Confidence: 0.8
Answer: x = 2";
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::ports::generation_gateway::GatewayError;
    use stepwise_domain::StepStatus;

    fn profile(problem_type: ProblemType) -> ProblemProfile {
        ProblemProfile {
            problem_type,
            ..Default::default()
        }
    }

    // ==================== Dispatch ====================

    #[test]
    fn test_select_maps_problem_types() {
        assert_eq!(
            EngineKind::select(&profile(ProblemType::Mathematical)),
            EngineKind::Mathematical
        );
        assert_eq!(
            EngineKind::select(&profile(ProblemType::Logical)),
            EngineKind::Logical
        );
        assert_eq!(
            EngineKind::select(&profile(ProblemType::Causal)),
            EngineKind::Causal
        );
    }

    #[test]
    fn test_select_falls_back_to_hybrid() {
        assert_eq!(
            EngineKind::select(&profile(ProblemType::General)),
            EngineKind::Hybrid
        );
    }

    #[test]
    fn test_engine_kind_from_str() {
        assert_eq!("math".parse::<EngineKind>().unwrap(), EngineKind::Mathematical);
        assert!("quantum".parse::<EngineKind>().is_err());
    }

    // ==================== Trace population ====================

    #[test]
    fn test_populate_from_trace_builds_completed_steps() {
        let mut result = ReasoningResult::new("p", ReasoningType::Mathematical);
        populate_from_trace(&mut result, SAMPLE_TRACE);

        assert_eq!(result.step_count(), 2);
        assert!(result
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Completed && s.completed_at.is_some()));
        assert_eq!(result.final_answer.as_deref(), Some("x = 2"));
        assert!((result.confidence - 0.85).abs() < 1e-9);
        assert!(result.completed_at.is_some());
    }

    #[test]
    fn test_populate_without_answer_line_uses_last_step() {
        let mut result = ReasoningResult::new("p", ReasoningType::Logical);
        populate_from_trace(&mut result, "Step 1: Only\nSocrates is mortal.\n");
        assert_eq!(result.final_answer.as_deref(), Some("Socrates is mortal."));
    }

    #[test]
    fn test_populate_from_unstructured_trace_stays_unsolved() {
        let mut result = ReasoningResult::new("p", ReasoningType::Hybrid);
        populate_from_trace(&mut result, "no structure at all");
        assert!(result.is_unsolved());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.step_count(), 0);
    }

    #[test]
    fn test_extract_answer_last_occurrence_wins() {
        let text = "Answer: draft\nmore thinking\nFinal answer: x = 2\n";
        assert_eq!(extract_answer(text).as_deref(), Some("x = 2"));
        assert_eq!(extract_answer("no answer line"), None);
    }

    // ==================== Shared flow ====================

    #[tokio::test]
    async fn test_run_generation_happy_path() {
        let gateway = MockGateway::replying(SAMPLE_TRACE);
        let params = ReasoningParams::default();
        let result =
            run_generation(&gateway, &params, EngineKind::Mathematical, "Solve 2x + 3 = 7").await;

        assert_eq!(result.reasoning_type, ReasoningType::Mathematical);
        assert_eq!(result.step_count(), 2);
        assert_eq!(result.final_answer.as_deref(), Some("x = 2"));
        assert!(result.execution_time >= 0.0);
    }

    #[tokio::test]
    async fn test_run_generation_degrades_on_gateway_error() {
        let gateway = MockGateway::failing();
        let params = ReasoningParams::default();
        let result = run_generation(&gateway, &params, EngineKind::Causal, "why?").await;

        assert!(result.is_unsolved());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.step_count(), 0);
        assert_eq!(result.reasoning_type, ReasoningType::Causal);
    }

    #[tokio::test]
    async fn test_run_generation_degrades_on_timeout() {
        struct SlowGateway;

        #[async_trait]
        impl GenerationGateway for SlowGateway {
            async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
                tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                Ok("too late".to_string())
            }
        }

        let params =
            ReasoningParams::default().with_engine_timeout(std::time::Duration::from_millis(10));
        let result = run_generation(&SlowGateway, &params, EngineKind::Hybrid, "p").await;
        assert!(result.is_unsolved());
    }
}
