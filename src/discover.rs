//! Locating the image a successful tool run produced.
//!
//! Two strategies, tried in order:
//!
//! 1. **Reported path**: the tool prints the written file on stdout. Any line
//!    that is, or ends with after a `label:` prefix, a path to an image is a
//!    candidate; the last accepted one wins. Relative paths resolve against
//!    the output directory. A candidate must resolve to a file directly
//!    inside the output directory and be within the freshness window.
//! 2. **Freshness scan**: the newest image among the output directory's
//!    immediate entries modified within the freshness window. Files already
//!    claimed earlier in the run are skipped.

use globset::GlobSet;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// How an image was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverySource {
    /// Path reported by the tool on stdout.
    Reported,
    /// Found by scanning the output directory.
    Scanned,
}

impl std::fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoverySource::Reported => write!(f, "reported"),
            DiscoverySource::Scanned => write!(f, "scanned"),
        }
    }
}

/// Parameters for locating an image.
pub struct Discovery<'a> {
    pub output_dir: &'a Path,
    pub image_globs: &'a GlobSet,
    pub freshness: Duration,
    /// Files claimed earlier in this run.
    pub claimed: &'a HashSet<PathBuf>,
}

impl Discovery<'_> {
    /// Locate the produced image, preferring a reported path.
    pub fn locate(&self, stdout: &str, now: SystemTime) -> Option<(PathBuf, DiscoverySource)> {
        if let Some(path) = self.reported_path(stdout, now) {
            return Some((path, DiscoverySource::Reported));
        }
        self.scan_fresh(now)
            .map(|path| (path, DiscoverySource::Scanned))
    }

    /// The last stdout line naming a fresh, unclaimed image directly inside
    /// the output directory.
    ///
    /// Paths elsewhere on disk are never accepted, however they are spelled.
    pub fn reported_path(&self, stdout: &str, now: SystemTime) -> Option<PathBuf> {
        let output_dir = self.output_dir.canonicalize().ok()?;
        stdout
            .lines()
            .filter_map(|line| self.path_from_line(line, &output_dir, now))
            .next_back()
    }

    fn path_from_line(&self, line: &str, output_dir: &Path, now: SystemTime) -> Option<PathBuf> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut candidates = vec![line];
        if let Some((_, rest)) = line.split_once(':') {
            candidates.push(rest.trim());
        }

        candidates.into_iter().find_map(|candidate| {
            let candidate = candidate.trim_matches(|c| c == '"' || c == '\'');
            let path = Path::new(candidate);
            let resolved = if path.is_absolute() {
                path.to_path_buf()
            } else {
                self.output_dir.join(path)
            };

            let canonical = resolved.canonicalize().ok()?;
            if canonical.parent() != Some(output_dir) {
                return None;
            }
            let name = canonical.file_name()?;
            if !self.image_globs.is_match(Path::new(name)) {
                return None;
            }

            let metadata = std::fs::metadata(&canonical).ok()?;
            let modified = metadata.modified().ok()?;
            if !metadata.is_file() || !is_fresh(modified, now, self.freshness) {
                return None;
            }

            // Same spelling as scan results and claimed entries.
            let in_dir = self.output_dir.join(name);
            (!self.claimed.contains(&in_dir)).then_some(in_dir)
        })
    }

    /// Newest unclaimed image in the output directory within the window.
    ///
    /// Ties on modification time are broken by file name so the choice does
    /// not depend on directory iteration order.
    pub fn scan_fresh(&self, now: SystemTime) -> Option<PathBuf> {
        let entries = std::fs::read_dir(self.output_dir).ok()?;

        let mut best: Option<(SystemTime, PathBuf)> = None;
        for entry in entries.flatten() {
            let path = entry.path();
            if !self.image_globs.is_match(Path::new(&entry.file_name())) {
                continue;
            }
            if self.claimed.contains(&path) {
                continue;
            }
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let Ok(modified) = metadata.modified() else {
                continue;
            };
            if !is_fresh(modified, now, self.freshness) {
                continue;
            }

            let newer = match &best {
                None => true,
                Some((best_time, best_path)) => {
                    modified > *best_time || (modified == *best_time && path < *best_path)
                }
            };
            if newer {
                best = Some((modified, path));
            }
        }

        best.map(|(_, path)| path)
    }
}

/// Whether a file modified at `modified` is within `window` of `now`.
/// Timestamps in the future count as fresh.
pub fn is_fresh(modified: SystemTime, now: SystemTime, window: Duration) -> bool {
    match now.duration_since(modified) {
        Ok(age) => age < window,
        Err(_) => true,
    }
}

/// Target path for a claimed image: `<dir>/<name><.ext>`, keeping the
/// original extension (including its case).
pub fn renamed_path(output_dir: &Path, name: &str, original: &Path) -> PathBuf {
    let file_name = match original.extension() {
        Some(ext) => format!("{}.{}", name, ext.to_string_lossy()),
        None => name.to_string(),
    };
    output_dir.join(file_name)
}
