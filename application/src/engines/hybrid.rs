//! Hybrid/auto reasoning engine.
//!
//! The fallback strategy: classifies the problem with the Parsing Layer
//! and delegates to the matching specialized engine, handling general
//! problems itself. It claims every problem, which is what makes it a
//! safe dispatch default.

use super::{
    EngineKind, ReasoningEngine, causal::CausalEngine, logical::LogicalEngine,
    mathematical::MathematicalEngine, run_generation,
};
use crate::config::ReasoningParams;
use crate::ports::generation_gateway::GenerationGateway;
use async_trait::async_trait;
use std::sync::Arc;
use stepwise_domain::{ProblemStatementParser, ProblemType, ReasoningResult};
use tracing::debug;

pub struct HybridEngine {
    gateway: Arc<dyn GenerationGateway>,
    params: ReasoningParams,
}

impl HybridEngine {
    pub fn new(gateway: Arc<dyn GenerationGateway>, params: ReasoningParams) -> Self {
        Self { gateway, params }
    }
}

#[async_trait]
impl ReasoningEngine for HybridEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Hybrid
    }

    fn can_handle(&self, _problem_statement: &str) -> bool {
        true
    }

    async fn reason(&self, problem_statement: &str) -> ReasoningResult {
        let problem_type = ProblemStatementParser::new()
            .parse(problem_statement)
            .problem()
            .map(|p| p.problem_type)
            .unwrap_or(ProblemType::General);
        debug!(classified = problem_type.as_str(), "hybrid dispatch");

        match problem_type {
            ProblemType::Mathematical => {
                MathematicalEngine::new(self.gateway.clone(), self.params.clone())
                    .reason(problem_statement)
                    .await
            }
            ProblemType::Logical => {
                LogicalEngine::new(self.gateway.clone(), self.params.clone())
                    .reason(problem_statement)
                    .await
            }
            ProblemType::Causal => {
                CausalEngine::new(self.gateway.clone(), self.params.clone())
                    .reason(problem_statement)
                    .await
            }
            ProblemType::General => {
                run_generation(
                    self.gateway.as_ref(),
                    &self.params,
                    self.kind(),
                    problem_statement,
                )
                .await
            }
        }
    }
}
