//! Supporting types for the batch configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default wall-clock timeout for one tool invocation.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Default freshness window for the directory-scan fallback.
pub const DEFAULT_FRESHNESS_SECONDS: u64 = 300;

/// A single prompt to send to the generation tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSpec {
    /// Identifier; also the stem of the renamed image file.
    pub name: String,

    /// Free-text prompt passed via `--prompt`.
    pub prompt: String,

    /// Model identifier passed via `--model`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Style identifier passed via `--style`.
    #[serde(default = "default_style")]
    pub style: String,

    /// Optional `WxH` dimension passed via `--size`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Gallery caption for the image produced by this prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl PromptSpec {
    /// Create a prompt with default model and style.
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            model: default_model(),
            style: default_style(),
            size: None,
            caption: None,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// How to invoke the external generation tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Program (plus leading arguments) used to run the entry point, parsed
    /// with shell-word rules. Empty means the entry point is executed directly.
    pub interpreter: String,

    /// Path to the tool's entry point. Must exist before a run starts.
    pub entry_point: PathBuf,

    /// Value of the `--quality` flag.
    pub quality: String,

    /// Timeout in seconds for one invocation.
    pub timeout_seconds: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            entry_point: PathBuf::from("scripts/gen.py"),
            quality: "hd".to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Gallery page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// File name of the gallery, written next to the output directory.
    pub file_name: String,

    /// Page title and heading.
    pub title: String,

    /// Caption used for prompts that do not carry their own.
    pub default_caption: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            file_name: "image_gallery.html".to_string(),
            title: "Image Gallery".to_string(),
            default_caption: "Generated image".to_string(),
        }
    }
}

pub(crate) fn default_model() -> String {
    "dall-e-3".to_string()
}

pub(crate) fn default_style() -> String {
    "vivid".to_string()
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("website/images")
}

pub(crate) fn default_freshness_seconds() -> u64 {
    DEFAULT_FRESHNESS_SECONDS
}

pub(crate) fn default_image_patterns() -> Vec<String> {
    ["*.png", "*.jpg", "*.jpeg", "*.webp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
