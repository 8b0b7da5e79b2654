//! Conversation store port
//!
//! Persistent storage is an external collaborator; this port gives it
//! get/upsert key-value semantics keyed by conversation id. Nothing in the
//! pipeline depends on what the store does with the data.

use async_trait::async_trait;
use stepwise_domain::ConversationId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Key-value repository for per-conversation state.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Fetch the stored payload for a conversation, if any.
    async fn get(&self, id: &ConversationId) -> Result<Option<serde_json::Value>, StoreError>;

    /// Insert or replace the stored payload for a conversation.
    async fn upsert(
        &self,
        id: &ConversationId,
        payload: serde_json::Value,
    ) -> Result<(), StoreError>;
}
