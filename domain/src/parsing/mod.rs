//! Free-text parsing.
//!
//! Two inputs arrive as free text: the user's problem statement and the
//! generation engine's step-by-step trace. Everything here is pure pattern
//! matching — no I/O, no session state. Parse failures are values
//! ([`outcome::ParseResult`] with `success: false`), never panics.

pub mod factory;
pub mod outcome;
pub mod problem;
pub mod sanitize;
pub mod steps;
