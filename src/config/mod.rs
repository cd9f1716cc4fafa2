//! Configuration model for imgbatch.
//!
//! This module defines the BatchConfig struct that represents `imgbatch.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, a built-in batch for runs without a
//! config file, and validation of config values.

mod model;
mod operations;
mod preset;
pub mod types;


// Re-export public API
pub use model::BatchConfig;
pub use operations::DEFAULT_CONFIG_FILE;
pub use preset::builtin;
pub use types::{GalleryConfig, PromptSpec, ToolConfig};
