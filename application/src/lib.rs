//! Application layer for stepwise
//!
//! Use cases and ports. This crate orchestrates the domain logic — engine
//! selection, reasoning, validation, formatting, streaming delivery — and
//! defines the interfaces (ports) that infrastructure adapters implement:
//! the generation gateway, the event sink and the conversation store.

pub mod config;
pub mod engines;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ReasoningParams;
pub use engines::{
    EngineKind, ReasoningEngine, causal::CausalEngine, hybrid::HybridEngine,
    logical::LogicalEngine, mathematical::MathematicalEngine,
};
pub use ports::{
    conversation_store::{ConversationStore, StoreError},
    event_sink::{EventSink, NoSink},
    generation_gateway::{GatewayError, GenerationGateway, StreamHandle},
};
pub use use_cases::{
    solve::{SolveError, SolveInput, SolveOutput, SolveUseCase},
    solve_stream::{StreamOutcome, StreamSolveInput, StreamSolveUseCase},
};
