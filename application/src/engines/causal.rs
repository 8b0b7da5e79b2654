//! Causal reasoning engine.

use super::{EngineKind, ReasoningEngine, run_generation};
use crate::config::ReasoningParams;
use crate::ports::generation_gateway::GenerationGateway;
use async_trait::async_trait;
use std::sync::Arc;
use stepwise_domain::{ProblemStatementParser, ProblemType, ReasoningResult};

/// Engine for cause-and-effect problems.
pub struct CausalEngine {
    gateway: Arc<dyn GenerationGateway>,
    params: ReasoningParams,
}

impl CausalEngine {
    pub fn new(gateway: Arc<dyn GenerationGateway>, params: ReasoningParams) -> Self {
        Self { gateway, params }
    }
}

#[async_trait]
impl ReasoningEngine for CausalEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Causal
    }

    fn can_handle(&self, problem_statement: &str) -> bool {
        ProblemStatementParser::new()
            .parse(problem_statement)
            .problem()
            .is_some_and(|p| p.problem_type == ProblemType::Causal)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::test_support::MockGateway;
    use stepwise_domain::ReasoningType;

    #[tokio::test]
    async fn test_causal_engine_claims_and_reasons() {
        let engine = CausalEngine::new(
            Arc::new(MockGateway::replying(
                "Step 1: Density\nIce is less dense than water.\nAnswer: Lower density",
            )),
            ReasoningParams::default(),
        );
        assert!(engine.can_handle("Why does ice float on water?"));
        assert!(!engine.can_handle("Calculate 2 + 2"));

        let result = engine.reason("Why does ice float?").await;
        assert_eq!(result.reasoning_type, ReasoningType::Causal);
        assert_eq!(result.final_answer.as_deref(), Some("Lower density"));
    }
}
