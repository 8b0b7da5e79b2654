//! Infrastructure layer for stepwise
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: generation engine gateways, the conversation store,
//! and configuration file loading.

pub mod config;
pub mod engine;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileEngineConfig, FileOutputConfig, FileValidationConfig,
};
pub use engine::ScriptedGateway;
#[cfg(feature = "http-engine")]
pub use engine::http::{HttpEngineConfig, HttpGenerationGateway};
pub use store::InMemoryConversationStore;
