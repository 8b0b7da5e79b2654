//! HTTP generation gateway.
//!
//! Talks to an Ollama-style generate endpoint: POST `{model, prompt,
//! stream}`. Non-streaming replies carry the full text in a `response`
//! field; streaming replies are NDJSON lines `{"response": …, "done": …}`
//! forwarded to the channel as they arrive.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stepwise_application::ports::generation_gateway::{
    GatewayError, GenerationGateway, StreamHandle,
};
use stepwise_domain::GenerationEvent;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Connection settings for the HTTP engine.
#[derive(Debug, Clone)]
pub struct HttpEngineConfig {
    /// Full URL of the generate endpoint.
    pub endpoint: String,
    /// Model name passed through to the engine.
    pub model: String,
    /// Whole-request timeout for the non-streaming call.
    pub request_timeout: Duration,
}

impl Default for HttpEngineConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".to_string(),
            model: "llama3".to_string(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

/// Gateway backed by an HTTP text-generation service.
pub struct HttpGenerationGateway {
    client: reqwest::Client,
    config: HttpEngineConfig,
}

impl HttpGenerationGateway {
    pub fn new(config: HttpEngineConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn send_request(&self, prompt: &str, stream: bool) -> Result<reqwest::Response, GatewayError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream,
        };
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {} from {}",
                status.as_u16(),
                self.config.endpoint
            )));
        }
        Ok(response)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Append a network chunk to the line buffer and drain every complete
/// NDJSON line.
fn drain_lines(buffer: &mut String, chunk: &str) -> Vec<String> {
    buffer.push_str(chunk);
    let mut lines = Vec::new();
    while let Some(index) = buffer.find('\n') {
        let line: String = buffer.drain(..=index).collect();
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    lines
}

#[async_trait]
impl GenerationGateway for HttpGenerationGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        debug!(endpoint = %self.config.endpoint, model = %self.config.model, "generate request");
        let response = self.send_request(prompt, false).await?;
        let chunk: GenerateChunk = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("bad response body: {e}")))?;
        Ok(chunk.response)
    }

    async fn stream(&self, prompt: &str) -> Result<StreamHandle, GatewayError> {
        debug!(endpoint = %self.config.endpoint, model = %self.config.model, "streaming generate request");
        let mut response = self.send_request(prompt, true).await?;

        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(async move {
            let mut buffer = String::new();
            let mut full_text = String::new();
            loop {
                match response.chunk().await {
                    Ok(Some(bytes)) => {
                        let text = String::from_utf8_lossy(&bytes);
                        for line in drain_lines(&mut buffer, &text) {
                            match serde_json::from_str::<GenerateChunk>(&line) {
                                Ok(chunk) => {
                                    if !chunk.response.is_empty() {
                                        full_text.push_str(&chunk.response);
                                        if tx
                                            .send(GenerationEvent::Delta(chunk.response))
                                            .await
                                            .is_err()
                                        {
                                            return;
                                        }
                                    }
                                    if chunk.done {
                                        let _ =
                                            tx.send(GenerationEvent::Completed(full_text)).await;
                                        return;
                                    }
                                }
                                Err(e) => {
                                    warn!("unparseable stream line: {e}");
                                }
                            }
                        }
                    }
                    Ok(None) => {
                        // Body ended without a done marker; close with what
                        // was received.
                        let _ = tx.send(GenerationEvent::Completed(full_text)).await;
                        return;
                    }
                    Err(e) => {
                        let _ = tx.send(GenerationEvent::Error(e.to_string())).await;
                        return;
                    }
                }
            }
        });
        Ok(StreamHandle::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_lines_splits_complete_lines() {
        let mut buffer = String::new();
        let lines = drain_lines(&mut buffer, "{\"a\":1}\n{\"b\":2}\n{\"c\"");
        assert_eq!(lines, vec!["{\"a\":1}", "{\"b\":2}"]);
        assert_eq!(buffer, "{\"c\"");
    }

    #[test]
    fn test_drain_lines_joins_across_chunks() {
        let mut buffer = String::new();
        assert!(drain_lines(&mut buffer, "{\"respon").is_empty());
        let lines = drain_lines(&mut buffer, "se\":\"hi\"}\n");
        assert_eq!(lines, vec!["{\"response\":\"hi\"}"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_drain_lines_skips_blank_lines() {
        let mut buffer = String::new();
        let lines = drain_lines(&mut buffer, "\n\n{\"x\":1}\n\n");
        assert_eq!(lines, vec!["{\"x\":1}"]);
    }

    #[test]
    fn test_generate_chunk_fields_are_optional() {
        let chunk: GenerateChunk = serde_json::from_str("{\"response\":\"hi\"}").unwrap();
        assert_eq!(chunk.response, "hi");
        assert!(!chunk.done);

        let done: GenerateChunk = serde_json::from_str("{\"done\":true}").unwrap();
        assert!(done.response.is_empty());
        assert!(done.done);
    }

    #[test]
    fn test_default_config_points_at_local_engine() {
        let config = HttpEngineConfig::default();
        assert!(config.endpoint.contains("localhost"));
        assert_eq!(config.request_timeout, Duration::from_secs(120));
    }
}
