//! Streaming delivery.
//!
//! [`event::GenerationEvent`] is what the generation engine produces;
//! [`event::DeliveryEvent`] is what the sink receives;
//! [`splitter::ThinkSplitter`] is the per-request state machine between
//! them, separating private reasoning from public answer content.

pub mod event;
pub mod splitter;
