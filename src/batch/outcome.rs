//! Per-item outcomes and the batch report.

use crate::discover::DiscoverySource;
use std::path::PathBuf;
use std::time::Duration;

/// An image that was produced, located, and renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Prompt name.
    pub name: String,
    /// File name as written by the tool.
    pub original_file: String,
    /// File name after renaming (`<name><ext>`).
    pub file_name: String,
    /// Absolute path of the renamed file.
    pub path: PathBuf,
    /// How the file was located.
    pub source: DiscoverySource,
}

/// What happened to one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Generated(GeneratedImage),
    /// The tool exited nonzero (or was terminated by a signal).
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
    TimedOut {
        timeout_seconds: u64,
    },
    /// The tool could not be run, or its image could not be renamed.
    InvocationError(String),
    /// The tool reported success but no image was found.
    NoFileFound,
}

impl ItemOutcome {
    /// Short label used in the event log.
    pub fn label(&self) -> &'static str {
        match self {
            ItemOutcome::Generated(_) => "generated",
            ItemOutcome::Failed { .. } => "failed",
            ItemOutcome::TimedOut { .. } => "timed_out",
            ItemOutcome::InvocationError(_) => "error",
            ItemOutcome::NoFileFound => "no_file",
        }
    }

    pub fn generated(&self) -> Option<&GeneratedImage> {
        match self {
            ItemOutcome::Generated(image) => Some(image),
            _ => None,
        }
    }
}

/// Outcome of one prompt in a run.
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub name: String,
    pub outcome: ItemOutcome,
    /// Wall time of the tool process, when one ran.
    pub duration: Option<Duration>,
}

/// Result of a full batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One report per configured prompt, in configuration order.
    pub items: Vec<ItemReport>,
    /// Gallery path, if one was written.
    pub gallery_path: Option<PathBuf>,
}

impl BatchReport {
    /// Images produced, in configuration order.
    pub fn generated(&self) -> impl Iterator<Item = &GeneratedImage> {
        self.items.iter().filter_map(|item| item.outcome.generated())
    }

    pub fn generated_count(&self) -> usize {
        self.generated().count()
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Number of items with the given outcome label.
    pub fn count(&self, label: &str) -> usize {
        self.items
            .iter()
            .filter(|item| item.outcome.label() == label)
            .count()
    }
}
