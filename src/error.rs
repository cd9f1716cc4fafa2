//! Error types for the imgbatch CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Per-item generation failures are not errors at this level; they are
//! recorded as [`crate::batch::ItemOutcome`] values and the batch continues.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for imgbatch operations.
#[derive(Error, Debug)]
pub enum ImgBatchError {
    /// The generation tool's entry point does not exist.
    #[error(
        "generation tool not found at '{}'\nFix: set `tool.entry_point` in the config or pass --tool <path>.",
        .0.display()
    )]
    MissingTool(PathBuf),

    /// User provided invalid arguments or configuration, or a filesystem
    /// operation outside the per-item loop failed.
    #[error("{0}")]
    UserError(String),
}

impl ImgBatchError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ImgBatchError::MissingTool(_) => exit_codes::USER_ERROR,
            ImgBatchError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for imgbatch operations.
pub type Result<T> = std::result::Result<T, ImgBatchError>;
