//! Run event log for imgbatch.
//!
//! Every run appends structured events to `{output_dir}/.imgbatch/events.ndjson`
//! (one JSON object per line), next to the per-item tool logs. Console output
//! is for people; this file is what to grep when a batch needs explaining.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: run_start, item_request, item_complete, gallery_write, run_finish
//! - `actor`: `user@HOST`
//! - `item`: prompt name for item events
//! - `details`: action-specific object

use crate::context::RunContext;
use crate::error::{ImgBatchError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Batch started.
    RunStart,
    /// Tool invoked for one prompt.
    ItemRequest,
    /// One prompt finished, whatever the outcome.
    ItemComplete,
    /// Gallery page written.
    GalleryWrite,
    /// Batch finished.
    RunFinish,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::RunStart => write!(f, "run_start"),
            EventAction::ItemRequest => write!(f, "item_request"),
            EventAction::ItemComplete => write!(f, "item_complete"),
            EventAction::GalleryWrite => write!(f, "gallery_write"),
            EventAction::RunFinish => write!(f, "run_finish"),
        }
    }
}

/// An event record for the run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,

    pub action: EventAction,

    /// Who ran the batch (`user@HOST`).
    pub actor: String,

    /// Prompt name for item events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,

    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            item: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_item(mut self, name: impl Into<String>) -> Self {
        self.item = Some(name.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            ImgBatchError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the run log, creating it if needed.
pub fn append_event(ctx: &RunContext, event: &Event) -> Result<()> {
    let events_file = ctx.events_file();
    let json_line = event.to_ndjson_line()?;

    fs::create_dir_all(&ctx.state_dir).map_err(|e| {
        ImgBatchError::UserError(format!(
            "failed to create state directory '{}': {}",
            ctx.state_dir.display(),
            e
        ))
    })?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            ImgBatchError::UserError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        ImgBatchError::UserError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })
}

/// Append an event, printing a warning instead of failing.
///
/// The run log never decides whether a batch succeeds.
pub fn record(ctx: &RunContext, event: Event) {
    if let Err(e) = append_event(ctx, &event) {
        eprintln!("Warning: failed to log {} event: {}", event.action, e);
    }
}

/// Read every event from the run log. Missing file means no events.
#[cfg(test)]
pub fn read_events(ctx: &RunContext) -> Result<Vec<Event>> {
    let events_file = ctx.events_file();
    if !events_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&events_file).map_err(|e| {
        ImgBatchError::UserError(format!(
            "failed to read events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                ImgBatchError::UserError(format!("failed to parse event line: {}", e))
            })
        })
        .collect()
}
