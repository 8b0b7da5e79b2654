//! Streaming solve use case.
//!
//! Drives one generation stream end to end: fragments from the gateway are
//! split into think/answer chunks and forwarded to the sink as ordered
//! `Content` events, then exactly one `Final` event closes the exchange —
//! carrying the aggregated content, engine metadata and the validation
//! summary. Cancellation is cooperative: the token is checked between
//! fragments, already-delivered content is preserved, and the terminal
//! content is suffixed with the stop marker.

use crate::config::ReasoningParams;
use crate::engines::{EngineKind, populate_from_trace};
use crate::ports::conversation_store::ConversationStore;
use crate::ports::event_sink::EventSink;
use crate::ports::generation_gateway::GenerationGateway;
use crate::use_cases::solve::SolveError;
use std::sync::Arc;
use std::time::Instant;
use stepwise_domain::{
    ConversationId, DeliveryEvent, GenerationEvent, InputSanitizer, ProblemStatementParser,
    ReasoningResult, ResultMetadata, STOP_MARKER, SplitChunk, ThinkSplitter, ValidationSummary,
    Validator, prompt,
    parsing::steps::DEFAULT_STEP_CONFIDENCE,
    util::truncate_str,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Input for the [`StreamSolveUseCase`].
#[derive(Debug, Clone)]
pub struct StreamSolveInput {
    pub problem: String,
    /// Explicit engine choice; `None` means auto-detect.
    pub engine: Option<EngineKind>,
    /// Caller-provided conversation id; a fresh one is synthesized when
    /// absent.
    pub conversation_id: Option<ConversationId>,
}

impl StreamSolveInput {
    pub fn new(problem: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
            engine: None,
            conversation_id: None,
        }
    }

    pub fn with_engine(mut self, engine: EngineKind) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_conversation_id(mut self, id: ConversationId) -> Self {
        self.conversation_id = Some(id);
        self
    }
}

/// What the caller gets back once the terminal event has been delivered.
#[derive(Debug, Clone)]
pub struct StreamOutcome {
    pub conversation_id: ConversationId,
    pub metadata: ResultMetadata,
}

/// Use case for one streaming reasoning exchange.
pub struct StreamSolveUseCase {
    gateway: Arc<dyn GenerationGateway>,
    params: ReasoningParams,
    store: Option<Arc<dyn ConversationStore>>,
}

impl StreamSolveUseCase {
    pub fn new(gateway: Arc<dyn GenerationGateway>) -> Self {
        Self {
            gateway,
            params: ReasoningParams::default(),
            store: None,
        }
    }

    pub fn with_params(mut self, params: ReasoningParams) -> Self {
        self.params = params;
        self
    }

    /// Record the final exchange state in a conversation store.
    pub fn with_store(mut self, store: Arc<dyn ConversationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Run the exchange, delivering events to `sink` as they happen.
    ///
    /// Returns after the `Final` event has been delivered. A cancelled
    /// exchange still resolves with `Ok`: the outcome's metadata has
    /// `stopped: true` and its content ends with the stop marker.
    pub async fn execute(
        &self,
        input: StreamSolveInput,
        sink: &dyn EventSink,
        cancel: CancellationToken,
    ) -> Result<StreamOutcome, SolveError> {
        let started = Instant::now();
        info!("Streaming solve: {}", truncate_str(&input.problem, 100));

        let sanitized = InputSanitizer::new().sanitize(&input.problem);
        let validator = Validator::new(self.params.validation.clone());
        if let Some(critical) = validator
            .validate_input(&sanitized)
            .iter()
            .find(|f| f.level.is_failing())
        {
            return Err(SolveError::InvalidInput(critical.message.clone()));
        }

        let conversation_id = input
            .conversation_id
            .unwrap_or_else(ConversationId::generate);

        let kind = match input.engine {
            Some(kind) => kind,
            None => ProblemStatementParser::new()
                .parse(&sanitized)
                .problem()
                .map(EngineKind::select)
                .unwrap_or(EngineKind::Hybrid),
        };
        debug!(
            engine = kind.as_str(),
            conversation = %conversation_id,
            "stream dispatch"
        );

        let prompt = prompt::step_prompt(kind.problem_type(), &sanitized);
        let mut splitter = ThinkSplitter::new();
        let mut stopped = false;
        let mut saw_delta = false;

        match self.gateway.stream(&prompt).await {
            Ok(mut handle) => loop {
                tokio::select! {
                    biased;

                    _ = cancel.cancelled() => {
                        info!(conversation = %conversation_id, "stream stopped by user");
                        splitter.cancel();
                        stopped = true;
                        break;
                    }
                    event = handle.receiver.recv() => match event {
                        Some(GenerationEvent::Delta(fragment)) => {
                            saw_delta = true;
                            let chunks = splitter.push(&fragment);
                            self.deliver_chunks(sink, &conversation_id, chunks);
                        }
                        Some(GenerationEvent::Completed(text)) => {
                            // Non-streaming adapters deliver everything here.
                            // True streams repeat the already-seen deltas in
                            // this event; the splitter may still be holding
                            // text back, so only the delta flag tells the two
                            // apart without double-counting.
                            if !saw_delta {
                                let chunks = splitter.push(&text);
                                self.deliver_chunks(sink, &conversation_id, chunks);
                            }
                            break;
                        }
                        Some(GenerationEvent::Error(message)) => {
                            warn!(conversation = %conversation_id, "stream error: {message}");
                            break;
                        }
                        None => break,
                    }
                }
            },
            Err(e) => {
                warn!(conversation = %conversation_id, "stream setup failed: {e}");
            }
        }

        if !stopped {
            let chunks = splitter.finish();
            self.deliver_chunks(sink, &conversation_id, chunks);
        }

        let metadata = self.assemble(kind, &sanitized, &splitter, started, stopped);
        sink.deliver(&DeliveryEvent::Final {
            conversation_id: conversation_id.clone(),
            metadata: metadata.clone(),
        });

        if let Some(store) = &self.store {
            match serde_json::to_value(&metadata) {
                Ok(payload) => {
                    if let Err(e) = store.upsert(&conversation_id, payload).await {
                        warn!(conversation = %conversation_id, "store upsert failed: {e}");
                    }
                }
                Err(e) => {
                    warn!(conversation = %conversation_id, "metadata not serializable: {e}");
                }
            }
        }

        Ok(StreamOutcome {
            conversation_id,
            metadata,
        })
    }

    fn deliver_chunks(
        &self,
        sink: &dyn EventSink,
        conversation_id: &ConversationId,
        chunks: Vec<SplitChunk>,
    ) {
        for chunk in chunks {
            sink.deliver(&DeliveryEvent::Content {
                conversation_id: conversation_id.clone(),
                content: chunk.text,
                is_think: chunk.is_think,
            });
        }
    }

    /// Build the terminal metadata from what the splitter accumulated:
    /// parse the trace into a structured result, validate it, and attach
    /// the aggregated content (stop-marked when cancelled).
    fn assemble(
        &self,
        kind: EngineKind,
        problem_statement: &str,
        splitter: &ThinkSplitter,
        started: Instant,
        stopped: bool,
    ) -> ResultMetadata {
        let aggregated = splitter.aggregated_text();

        // Step structure may live in the think segment, the answer, or both.
        let trace = if splitter.think_text().is_empty() {
            splitter.answer_text().to_string()
        } else {
            format!("{}\n{}", splitter.think_text(), splitter.answer_text())
        };

        let mut result = ReasoningResult::new(problem_statement, kind.reasoning_type());
        populate_from_trace(&mut result, &trace);
        if result.is_unsolved() && !aggregated.trim().is_empty() && !stopped {
            // Unstructured but non-empty output still answers the question.
            result.complete(aggregated.trim(), DEFAULT_STEP_CONFIDENCE);
        }
        result.execution_time = started.elapsed().as_secs_f64();

        let validator = Validator::new(self.params.validation.clone());
        let findings = validator.validate_result(&result);
        let validation = ValidationSummary::from_findings(&findings);

        let content = if stopped {
            if aggregated.is_empty() {
                STOP_MARKER.to_string()
            } else {
                format!("{aggregated}\n\n{STOP_MARKER}")
            }
        } else {
            aggregated
        };

        ResultMetadata {
            content,
            engine: kind.as_str().to_string(),
            reasoning_type: result.reasoning_type,
            steps_count: result.step_count(),
            confidence: result.confidence,
            validation,
            stopped,
        }
    }
}
