//! Presentation layer for stepwise
//!
//! Console delivery of streamed reasoning output: answer fragments are
//! printed as they arrive, think content is dimmed, and the terminal event
//! becomes a summary block.

pub mod console;

pub use console::ConsoleSink;
