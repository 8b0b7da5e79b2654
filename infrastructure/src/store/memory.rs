//! In-memory conversation store.

use async_trait::async_trait;
use std::collections::HashMap;
use stepwise_application::ports::conversation_store::{ConversationStore, StoreError};
use stepwise_domain::ConversationId;
use tokio::sync::RwLock;

/// Process-local store keyed by conversation id. State is lost on restart;
/// suitable for the CLI and for tests.
#[derive(Default)]
pub struct InMemoryConversationStore {
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, id: &ConversationId) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.entries.read().await.get(id.as_str()).cloned())
    }

    async fn upsert(
        &self,
        id: &ConversationId,
        payload: serde_json::Value,
    ) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(id.as_str().to_string(), payload);
        Ok(())
    }
}
