//! Use cases — the pipelines exposed to external collaborators.

pub mod solve;
pub mod solve_stream;
