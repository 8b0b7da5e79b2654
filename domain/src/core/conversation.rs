//! Conversation identifier value object.
//!
//! A [`ConversationId`] correlates every event emitted for one exchange so
//! the sink can group fragments belonging to the same request. Callers may
//! provide their own id; the server synthesizes one on first use otherwise.

use serde::{Deserialize, Serialize};

/// Identifier threading through every event of one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesize a fresh id (server-side, when the caller provided none).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(ConversationId::generate(), ConversationId::generate());
    }

    #[test]
    fn test_display_round_trips() {
        let id = ConversationId::new("conv-42");
        assert_eq!(id.to_string(), "conv-42");
        assert_eq!(id.as_str(), "conv-42");
    }
}
