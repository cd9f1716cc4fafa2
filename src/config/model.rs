//! BatchConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one batch run.
///
/// This struct represents the contents of `imgbatch.yaml`. Unknown fields in
/// the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// External generation tool.
    pub tool: ToolConfig,

    /// Directory the tool writes into and where images are renamed.
    /// Relative paths resolve against the current working directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Seconds an image may be old and still be claimed by the directory scan.
    #[serde(default = "default_freshness_seconds")]
    pub freshness_seconds: u64,

    /// File-name globs that identify image artifacts (matched case-insensitively).
    #[serde(default = "default_image_patterns")]
    pub image_patterns: Vec<String>,

    /// Gallery page settings.
    pub gallery: GalleryConfig,

    /// Prompts, processed in order.
    pub prompts: Vec<PromptSpec>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            tool: ToolConfig::default(),
            output_dir: default_output_dir(),
            freshness_seconds: default_freshness_seconds(),
            image_patterns: default_image_patterns(),
            gallery: GalleryConfig::default(),
            prompts: Vec::new(),
        }
    }
}
