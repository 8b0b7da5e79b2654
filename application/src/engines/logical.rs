//! Logical reasoning engine.

use super::{EngineKind, ReasoningEngine, run_generation};
use crate::config::ReasoningParams;
use crate::ports::generation_gateway::GenerationGateway;
use async_trait::async_trait;
use std::sync::Arc;
use stepwise_domain::{ProblemStatementParser, ProblemType, ReasoningResult};

/// Engine for problems built on quantifiers and conditionals.
pub struct LogicalEngine {
    gateway: Arc<dyn GenerationGateway>,
    params: ReasoningParams,
}

impl LogicalEngine {
    pub fn new(gateway: Arc<dyn GenerationGateway>, params: ReasoningParams) -> Self {
        Self { gateway, params }
    }
}

#[async_trait]
impl ReasoningEngine for LogicalEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Logical
    }

    fn can_handle(&self, problem_statement: &str) -> bool {
        ProblemStatementParser::new()
            .parse(problem_statement)
            .problem()
            .is_some_and(|p| p.problem_type == ProblemType::Logical)
    }

    async fn reason(&self, problem_statement: &str) -> ReasoningResult {
        run_generation(
            self.gateway.as_ref(),
            &self.params,
            self.kind(),
            problem_statement,
        )
        .await
    }
}
