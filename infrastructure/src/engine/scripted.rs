//! Scripted generation gateway.
//!
//! Plays back canned fragments as a stream, with an optional inter-chunk
//! pause. Used by the demo mode and by tests that need a predictable
//! engine without a network.

use async_trait::async_trait;
use std::time::Duration;
use stepwise_application::ports::generation_gateway::{
    GatewayError, GenerationGateway, StreamHandle,
};
use stepwise_domain::GenerationEvent;
use tokio::sync::mpsc;

/// Gateway that replays a fixed fragment script.
pub struct ScriptedGateway {
    fragments: Vec<String>,
    chunk_delay: Duration,
}

impl ScriptedGateway {
    pub fn new(fragments: Vec<String>) -> Self {
        Self {
            fragments,
            chunk_delay: Duration::ZERO,
        }
    }

    /// Pause between fragments, so streamed output is visibly incremental.
    pub fn with_chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = delay;
        self
    }

    /// A canned step-by-step trace with a think segment, for demo mode.
    pub fn demo() -> Self {
        let script = [
            "<think>",
            "Let me work through this carefully ",
            "before answering.",
            "</think>",
            "Step 1: Understand the problem\n",
            "We need the value of x satisfying 2x + 3 = 7.\n",
            "Confidence: 0.9\n",
            "Step 2: Isolate x\n",
            "Subtract 3 from both sides, then divide by 2.\n",
            "Confidence: 0.85\n",
            "Answer: x = 2\n",
        ];
        Self::new(script.iter().map(|s| s.to_string()).collect())
            .with_chunk_delay(Duration::from_millis(120))
    }
}

#[async_trait]
impl GenerationGateway for ScriptedGateway {
    async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
        Ok(self.fragments.concat())
    }

    async fn stream(&self, _prompt: &str) -> Result<StreamHandle, GatewayError> {
        let (tx, rx) = mpsc::channel(16);
        let fragments = self.fragments.clone();
        let chunk_delay = self.chunk_delay;
        tokio::spawn(async move {
            let mut full_text = String::new();
            for fragment in fragments {
                if !chunk_delay.is_zero() {
                    tokio::time::sleep(chunk_delay).await;
                }
                full_text.push_str(&fragment);
                // A closed channel means the consumer abandoned the stream.
                if tx.send(GenerationEvent::Delta(fragment)).await.is_err() {
                    return;
                }
            }
            let _ = tx.send(GenerationEvent::Completed(full_text)).await;
        });
        Ok(StreamHandle::new(rx))
    }
}
