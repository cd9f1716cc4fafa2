//! Atomic file writes.
//!
//! The gallery page and scaffolded config files are written through a
//! temporary sibling file that is synced and then renamed over the target, so
//! a browser refreshing the gallery mid-run never sees a truncated page.
//!
//! On crash a `.{filename}.tmp` file may remain next to the target.

use crate::error::{ImgBatchError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            ImgBatchError::UserError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;
    replace(&temp_path, path)
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ImgBatchError::UserError(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        ImgBatchError::UserError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(ImgBatchError::UserError(format!(
            "failed to write temporary file '{}': {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

#[cfg(unix)]
fn replace(source: &Path, target: &Path) -> Result<()> {
    // rename(2) replaces an existing target atomically.
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        ImgBatchError::UserError(format!(
            "failed to atomically replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(not(unix))]
fn replace(source: &Path, target: &Path) -> Result<()> {
    // Non-unix rename can refuse an existing target; clear it and retry once.
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }
    let _ = fs::remove_file(target);
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        ImgBatchError::UserError(format!("failed to replace '{}': {}", target.display(), e))
    })
}
