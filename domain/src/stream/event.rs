//! Streaming events.
//!
//! [`GenerationEvent`] bridges the generation engine's incremental output
//! to the pipeline; [`DeliveryEvent`] is the ordered wire contract toward
//! the presentation sink: zero or more `Content` events followed by exactly
//! one `Final` event.

use crate::core::conversation::ConversationId;
use crate::reasoning::entities::ReasoningType;
use crate::validation::finding::ValidationSummary;
use serde::{Deserialize, Serialize};

/// Appended to the aggregated content when a request is stopped by the
/// user, so a cancelled response is never mistaken for a complete one.
pub const STOP_MARKER: &str = "[stopped by user]";

/// An event in a streaming generation response.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// A text fragment from the engine.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// An error that occurred during streaming.
    Error(String),
}

impl GenerationEvent {
    /// Returns the text content if this is a Delta or Completed event.
    pub fn text(&self) -> Option<&str> {
        match self {
            GenerationEvent::Delta(s) | GenerationEvent::Completed(s) => Some(s),
            GenerationEvent::Error(_) => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationEvent::Completed(_) | GenerationEvent::Error(_)
        )
    }
}

/// Aggregate metadata carried by the terminal event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Full aggregated answer text
    pub content: String,
    /// Which engine handled the request
    pub engine: String,
    /// Classified reasoning type
    pub reasoning_type: ReasoningType,
    /// Number of recognized reasoning steps
    pub steps_count: usize,
    /// Engine's self-reported confidence
    pub confidence: f64,
    /// Summary of the validation pass over the assembled result
    pub validation: ValidationSummary,
    /// True when the request was stopped by the user
    pub stopped: bool,
}

/// One event delivered to the sink.
///
/// Every event carries the conversation id so the sink can correlate
/// fragments belonging to the same exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliveryEvent {
    /// An ordered content fragment.
    Content {
        conversation_id: ConversationId,
        content: String,
        /// True for private-reasoning content (routed to a collapsible
        /// panel rather than the main answer).
        is_think: bool,
    },
    /// The terminal event; no content follows it.
    Final {
        conversation_id: ConversationId,
        #[serde(flatten)]
        metadata: ResultMetadata,
    },
}

impl DeliveryEvent {
    pub fn conversation_id(&self) -> &ConversationId {
        match self {
            DeliveryEvent::Content {
                conversation_id, ..
            }
            | DeliveryEvent::Final {
                conversation_id, ..
            } => conversation_id,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, DeliveryEvent::Final { .. })
    }
}
