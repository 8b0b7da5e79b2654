//! Ports — interfaces implemented by infrastructure adapters.

pub mod conversation_store;
pub mod event_sink;
pub mod generation_gateway;
