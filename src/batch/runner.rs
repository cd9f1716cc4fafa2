//! The generation loop.

use super::display;
use super::outcome::{BatchReport, GeneratedImage, ItemOutcome, ItemReport};
use crate::config::{BatchConfig, PromptSpec};
use crate::context::RunContext;
use crate::discover::{Discovery, renamed_path};
use crate::error::Result;
use crate::events::{self, Event, EventAction};
use crate::gallery::{self, GalleryEntry};
use crate::tool::{Invocation, execute_tool};
use globset::GlobSet;
use serde_json::json;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Characters of stderr kept when a tool run fails.
pub const STDERR_EXCERPT_CHARS: usize = 200;

/// Run every prompt in `config`, then write the gallery if anything was
/// produced.
///
/// Fails before any work if the tool entry point is missing. Per-item
/// failures are recorded in the returned report and never abort the batch.
pub fn run_batch(config: &BatchConfig, ctx: &RunContext) -> Result<BatchReport> {
    ctx.require_tool()?;
    ctx.ensure_output_dir()?;

    let mut runner = BatchRunner {
        config,
        ctx,
        image_globs: config.image_globs()?,
        claimed: HashSet::new(),
    };
    runner.run()
}

struct BatchRunner<'a> {
    config: &'a BatchConfig,
    ctx: &'a RunContext,
    image_globs: GlobSet,
    /// Renamed files of this run; never claimed again.
    claimed: HashSet<PathBuf>,
}

impl BatchRunner<'_> {
    fn run(&mut self) -> Result<BatchReport> {
        let total = self.config.prompts.len();

        events::record(
            self.ctx,
            Event::new(EventAction::RunStart).with_details(json!({
                "prompts": total,
                "output_dir": self.ctx.output_dir.to_string_lossy(),
                "tool": self.ctx.tool_entry_point.to_string_lossy(),
                "timeout_seconds": self.config.tool.timeout_seconds,
            })),
        );

        display::print_header(total, &self.config.gallery.title);

        let mut report = BatchReport::default();
        for (index, spec) in self.config.prompts.iter().enumerate() {
            display::print_item_start(index, total, spec);
            let item = self.process(spec);
            display::print_outcome(&item.outcome);
            self.record_completion(&item);
            report.items.push(item);
        }

        display::print_summary(&report, &self.ctx.output_dir);

        let entries = self.gallery_entries(&report);
        if !entries.is_empty() {
            let path = gallery::write_gallery(self.ctx, self.config, &entries)?;
            events::record(
                self.ctx,
                Event::new(EventAction::GalleryWrite).with_details(json!({
                    "path": path.to_string_lossy(),
                    "cards": entries.len(),
                })),
            );
            display::print_gallery(&path);
            report.gallery_path = Some(path);
        }

        events::record(
            self.ctx,
            Event::new(EventAction::RunFinish).with_details(json!({
                "prompts": report.total(),
                "generated": report.generated_count(),
                "failed": report.count("failed"),
                "timed_out": report.count("timed_out"),
                "errors": report.count("error"),
                "no_file": report.count("no_file"),
                "gallery": report.gallery_path.as_ref().map(|p| p.to_string_lossy().to_string()),
            })),
        );

        Ok(report)
    }

    fn process(&mut self, spec: &PromptSpec) -> ItemReport {
        let (outcome, duration) = match self.generate(spec) {
            Ok((outcome, duration)) => (outcome, Some(duration)),
            Err(e) => (ItemOutcome::InvocationError(e.to_string()), None),
        };

        ItemReport {
            name: spec.name.clone(),
            outcome,
            duration,
        }
    }

    fn generate(&mut self, spec: &PromptSpec) -> Result<(ItemOutcome, Duration)> {
        let invocation = Invocation::for_prompt(self.config, self.ctx, spec)?;

        events::record(
            self.ctx,
            Event::new(EventAction::ItemRequest)
                .with_item(&spec.name)
                .with_details(json!({
                    "command": invocation.to_string(),
                    "model": spec.model,
                    "style": spec.style,
                    "size": spec.size,
                })),
        );

        let timeout_seconds = self.config.tool.timeout_seconds;
        let result = execute_tool(
            &invocation,
            &self.ctx.item_logs_dir(&spec.name),
            timeout_seconds,
        )?;

        if result.timed_out {
            return Ok((ItemOutcome::TimedOut { timeout_seconds }, result.duration));
        }
        if !result.is_success() {
            let outcome = ItemOutcome::Failed {
                exit_code: result.exit_code,
                stderr: result.stderr_excerpt(STDERR_EXCERPT_CHARS),
            };
            return Ok((outcome, result.duration));
        }

        let outcome = match self.claim(spec, &result.stdout())? {
            Some(image) => ItemOutcome::Generated(image),
            None => ItemOutcome::NoFileFound,
        };
        Ok((outcome, result.duration))
    }

    /// Locate the produced image and rename it to `<name><ext>`.
    fn claim(&mut self, spec: &PromptSpec, stdout: &str) -> Result<Option<GeneratedImage>> {
        let discovery = Discovery {
            output_dir: &self.ctx.output_dir,
            image_globs: &self.image_globs,
            freshness: Duration::from_secs(self.config.freshness_seconds),
            claimed: &self.claimed,
        };
        let Some((found, source)) = discovery.locate(stdout, SystemTime::now()) else {
            return Ok(None);
        };

        let target = renamed_path(&self.ctx.output_dir, &spec.name, &found);
        crate::fs::move_file(&found, &target)?;
        self.claimed.insert(target.clone());

        Ok(Some(GeneratedImage {
            name: spec.name.clone(),
            original_file: file_name_of(&found),
            file_name: file_name_of(&target),
            path: target,
            source,
        }))
    }

    fn record_completion(&self, item: &ItemReport) {
        let mut details = json!({
            "outcome": item.outcome.label(),
            "duration_ms": item.duration.map(|d| d.as_millis() as u64),
        });
        match &item.outcome {
            ItemOutcome::Generated(image) => {
                details["file"] = json!(image.file_name);
                details["original_file"] = json!(image.original_file);
                details["discovered_by"] = json!(image.source.to_string());
            }
            ItemOutcome::Failed { exit_code, stderr } => {
                details["exit_code"] = json!(exit_code);
                details["stderr"] = json!(stderr);
            }
            ItemOutcome::TimedOut { timeout_seconds } => {
                details["timeout_seconds"] = json!(timeout_seconds);
            }
            ItemOutcome::InvocationError(message) => {
                details["error"] = json!(message);
            }
            ItemOutcome::NoFileFound => {}
        }

        events::record(
            self.ctx,
            Event::new(EventAction::ItemComplete)
                .with_item(&item.name)
                .with_details(details),
        );
    }

    fn gallery_entries(&self, report: &BatchReport) -> Vec<GalleryEntry> {
        self.config
            .prompts
            .iter()
            .zip(&report.items)
            .filter_map(|(spec, item)| {
                item.outcome
                    .generated()
                    .map(|image| GalleryEntry::for_prompt(spec, image.file_name.clone(), self.config))
            })
            .collect()
    }
}

fn file_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
