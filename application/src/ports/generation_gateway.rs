//! Generation gateway port
//!
//! Defines the interface for the black-box text-generation engine.

use async_trait::async_trait;
use stepwise_domain::GenerationEvent;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during generation gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport closed")]
    TransportClosed,

    #[error("Other error: {0}")]
    Other(String),
}

/// Handle for receiving streaming events from the generation engine.
///
/// Wraps an `mpsc::Receiver<GenerationEvent>`. Dropping the handle is
/// cooperative abandonment: the producer side must tolerate a closed
/// channel without erroring.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<GenerationEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<GenerationEvent>) -> Self {
        Self { receiver }
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                GenerationEvent::Delta(chunk) => full_text.push_str(&chunk),
                GenerationEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                GenerationEvent::Error(e) => {
                    return Err(GatewayError::RequestFailed(e));
                }
            }
        }
        // Channel closed without Completed — return what we have
        Ok(full_text)
    }
}

/// Gateway for the text-generation engine.
///
/// This port defines how the application layer reaches the engine.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Send a prompt and get the complete response text.
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Send a prompt and get an incremental response.
    ///
    /// Default implementation calls `complete()` and wraps the result in a
    /// single `Completed` event, so non-streaming adapters work unchanged.
    async fn stream(&self, prompt: &str) -> Result<StreamHandle, GatewayError> {
        let result = self.complete(prompt).await?;
        let (tx, rx) = mpsc::channel(1);
        // If the receiver is dropped, that's fine
        let _ = tx.send(GenerationEvent::Completed(result)).await;
        Ok(StreamHandle::new(rx))
    }
}
