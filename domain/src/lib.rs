//! Domain layer for stepwise
//!
//! This crate contains the core business logic of the reasoning pipeline:
//! entities, free-text parsing, rule-based validation, output formatting and
//! the think/answer stream splitter. It is pure and synchronous — no I/O,
//! no async, no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Reasoning
//!
//! A problem statement is turned into a [`ReasoningResult`]: an ordered,
//! append-only sequence of [`ReasoningStep`]s plus a final answer and a
//! self-reported confidence.
//!
//! ## Validation
//!
//! Validation is advisory, never blocking: rules produce
//! [`ValidationFinding`] values with severity levels, and callers decide
//! what to do with the derived [`ValidationSummary`].

pub mod core;
pub mod formatting;
pub mod parsing;
pub mod prompt;
pub mod reasoning;
pub mod stream;
pub mod util;
pub mod validation;

// Re-export commonly used types
pub use core::{conversation::ConversationId, error::DomainError};
pub use formatting::{
    format::OutputFormat,
    formatter::{FormatterFactory, ResultFormatter},
};
pub use parsing::{
    factory::{Parser, ParserFactory},
    outcome::{ParseData, ParseResult, ParsedStep, ProblemProfile, ProblemType},
    problem::ProblemStatementParser,
    sanitize::InputSanitizer,
    steps::StepOutputParser,
};
pub use reasoning::entities::{ReasoningResult, ReasoningStep, ReasoningType, StepStatus};
pub use stream::{
    event::{DeliveryEvent, GenerationEvent, ResultMetadata, STOP_MARKER},
    splitter::{SplitChunk, SplitPhase, ThinkSplitter},
};
pub use validation::{
    finding::{ValidationFinding, ValidationLevel, ValidationSummary, ValidationTarget},
    rules::{ValidationConfig, Validator},
};
