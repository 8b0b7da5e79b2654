//! Output rendering for completed results.

pub mod format;
pub mod formatter;
