//! Generation engine adapters.

#[cfg(feature = "http-engine")]
pub mod http;
pub mod scripted;

pub use scripted::ScriptedGateway;
