//! Configuration file loading.

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileEngineConfig, FileOutputConfig, FileValidationConfig};
pub use loader::ConfigLoader;
