//! Renaming generated images into place.
//!
//! A claimed image is always renamed within the output directory, which is a
//! plain `rename(2)`. Some union and network filesystems still answer `EXDEV`
//! there; we then copy and delete instead.

use crate::error::{ImgBatchError, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Move a single file from `source` to `destination`, replacing any file
/// already at `destination`.
pub fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if source == destination {
        return Ok(());
    }

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => copy_then_remove(source, destination, e),
        Err(e) => Err(ImgBatchError::UserError(format!(
            "failed to rename '{}' to '{}': {}",
            source.display(),
            destination.display(),
            e
        ))),
    }
}

fn copy_then_remove(source: &Path, destination: &Path, rename_error: io::Error) -> Result<()> {
    let content = fs::read(source).map_err(|e| {
        ImgBatchError::UserError(format!(
            "failed to read '{}' for cross-device move: {} (rename error: {})",
            source.display(),
            e,
            rename_error
        ))
    })?;

    crate::fs::atomic_write(destination, &content)?;

    fs::remove_file(source).map_err(|e| {
        ImgBatchError::UserError(format!(
            "copied '{}' across devices but failed to delete it: {}",
            source.display(),
            e
        ))
    })
}

fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices || err.raw_os_error() == Some(18)
}
