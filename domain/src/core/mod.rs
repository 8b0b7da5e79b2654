//! Core domain types shared across modules.

pub mod conversation;
pub mod error;
