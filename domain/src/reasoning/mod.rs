//! Reasoning domain entities.

pub mod entities;
