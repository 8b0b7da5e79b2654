//! Solve use case (non-streaming).
//!
//! Runs the full pipeline once: sanitize and validate the input, select a
//! reasoning engine, reason, validate the assembled result, render it in
//! the requested output format.

use crate::config::ReasoningParams;
use crate::engines::{EngineKind, build_engine};
use crate::ports::generation_gateway::GenerationGateway;
use serde::Serialize;
use std::sync::Arc;
use stepwise_domain::{
    DomainError, FormatterFactory, InputSanitizer, OutputFormat, ProblemStatementParser,
    ReasoningType, ValidationSummary, Validator,
    util::truncate_str,
};
use thiserror::Error;
use tracing::info;

/// Errors surfaced by the solve pipeline.
///
/// Only input problems and configuration mistakes reach the caller;
/// generation failures degrade the result instead (an absent answer with
/// zero confidence).
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Configuration(#[from] DomainError),
}

/// Input for the [`SolveUseCase`].
#[derive(Debug, Clone)]
pub struct SolveInput {
    /// The problem statement to reason about.
    pub problem: String,
    /// Explicit engine choice; `None` means auto-detect.
    pub engine: Option<EngineKind>,
    /// Output encoding for the rendered result.
    pub format: OutputFormat,
}

impl SolveInput {
    pub fn new(problem: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
            engine: None,
            format: OutputFormat::default(),
        }
    }

    pub fn with_engine(mut self, engine: EngineKind) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// The structured result object handed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct SolveOutput {
    /// The rendered result in the requested format.
    pub response: String,
    pub reasoning_type: ReasoningType,
    pub engine_used: String,
    pub steps_count: usize,
    pub confidence: f64,
    pub validation_summary: ValidationSummary,
}

/// Use case for one blocking reasoning invocation.
pub struct SolveUseCase {
    gateway: Arc<dyn GenerationGateway>,
    params: ReasoningParams,
}

impl SolveUseCase {
    pub fn new(gateway: Arc<dyn GenerationGateway>) -> Self {
        Self {
            gateway,
            params: ReasoningParams::default(),
        }
    }

    pub fn with_params(mut self, params: ReasoningParams) -> Self {
        self.params = params;
        self
    }

    pub async fn execute(&self, input: SolveInput) -> Result<SolveOutput, SolveError> {
        info!("Solving: {}", truncate_str(&input.problem, 100));

        let sanitized = InputSanitizer::new().sanitize(&input.problem);
        let validator = Validator::new(self.params.validation.clone());

        let input_findings = validator.validate_input(&sanitized);
        if let Some(critical) = input_findings.iter().find(|f| f.level.is_failing()) {
            return Err(SolveError::InvalidInput(critical.message.clone()));
        }

        let kind = match input.engine {
            Some(kind) => kind,
            None => ProblemStatementParser::new()
                .parse(&sanitized)
                .problem()
                .map(EngineKind::select)
                .unwrap_or(EngineKind::Hybrid),
        };

        let engine = build_engine(kind, self.gateway.clone(), self.params.clone());
        let result = engine.reason(&sanitized).await;

        let mut findings = input_findings;
        findings.extend(validator.validate_result(&result));
        let validation_summary = ValidationSummary::from_findings(&findings);

        let response = FormatterFactory::create(input.format).format(&result);

        info!(
            engine = kind.as_str(),
            steps = result.step_count(),
            solved = !result.is_unsolved(),
            "solve completed in {:.2}s",
            result.execution_time
        );

        Ok(SolveOutput {
            response,
            reasoning_type: result.reasoning_type,
            engine_used: kind.as_str().to_string(),
            steps_count: result.step_count(),
            confidence: result.confidence,
            validation_summary,
        })
    }
}
