//! Rule-based validation.
//!
//! Validation is advisory, not blocking: every entry point returns an
//! ordered list of [`finding::ValidationFinding`] values and never errors.
//! Callers reduce findings to a [`finding::ValidationSummary`] and decide
//! whether to surface, log, or drop them.

pub mod finding;
pub mod rules;
