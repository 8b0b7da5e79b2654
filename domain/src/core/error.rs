//! Domain error types

use thiserror::Error;

/// Domain-level errors.
///
/// Parsing and validation never produce these — they return typed failure
/// values instead. `DomainError` covers programmer/configuration mistakes
/// (unknown names) and the cancellation terminal state.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown parser: {0}")]
    UnknownParser(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Empty problem statement")]
    EmptyInput,

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
