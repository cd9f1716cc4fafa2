//! Path resolution for a batch run.
//!
//! Every command resolves its paths through [`RunContext`] so that the output
//! directory, gallery file, per-item logs, and the event log are derived in
//! one place. All paths are absolute.

use crate::config::BatchConfig;
use crate::error::{ImgBatchError, Result};
use std::path::{Component, Path, PathBuf};

/// Directory inside the output directory holding imgbatch's own state.
pub const STATE_DIR_NAME: &str = ".imgbatch";

/// Resolved paths for one imgbatch run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Directory the tool writes into and where images are renamed.
    pub output_dir: PathBuf,

    /// Path of the gallery document (in the output directory's parent).
    pub gallery_path: PathBuf,

    /// Absolute path to the tool's entry point.
    pub tool_entry_point: PathBuf,

    /// State directory (`{output_dir}/.imgbatch/`).
    pub state_dir: PathBuf,
}

impl RunContext {
    /// Resolve the context against a specific base directory.
    pub fn resolve_from(config: &BatchConfig, base: &Path) -> Self {
        let output_dir = absolutize(base, &config.output_dir);
        let gallery_dir = output_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| output_dir.clone());
        let gallery_path = gallery_dir.join(&config.gallery.file_name);
        let tool_entry_point = absolutize(base, &config.tool.entry_point);
        let state_dir = output_dir.join(STATE_DIR_NAME);

        Self {
            output_dir,
            gallery_path,
            tool_entry_point,
            state_dir,
        }
    }

    /// Directory for a single item's captured stdout/stderr.
    pub fn item_logs_dir(&self, name: &str) -> PathBuf {
        self.state_dir.join("logs").join(name)
    }

    /// Path of the NDJSON event log.
    pub fn events_file(&self) -> PathBuf {
        self.state_dir.join("events.ndjson")
    }

    /// Prefix used for image `src` attributes in the gallery, relative to
    /// the gallery file (e.g. `images/`).
    pub fn gallery_src_prefix(&self) -> String {
        match self.output_dir.file_name() {
            Some(name) if self.gallery_path.parent() != Some(self.output_dir.as_path()) => {
                format!("{}/", name.to_string_lossy())
            }
            _ => String::new(),
        }
    }

    /// Fail with [`ImgBatchError::MissingTool`] unless the entry point exists.
    pub fn require_tool(&self) -> Result<()> {
        if self.tool_entry_point.exists() {
            Ok(())
        } else {
            Err(ImgBatchError::MissingTool(self.tool_entry_point.clone()))
        }
    }

    /// Create the output directory if it does not exist.
    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            ImgBatchError::UserError(format!(
                "failed to create output directory '{}': {}",
                self.output_dir.display(),
                e
            ))
        })
    }
}

/// Join `path` onto `base` and fold `.` and `..` components, so that
/// `parent()` and `file_name()` describe the directory actually meant.
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
