//! Console progress output for a batch run.

use super::outcome::{BatchReport, ItemOutcome};
use crate::config::PromptSpec;
use std::path::Path;

/// Characters of the prompt shown in the progress line.
pub const PROMPT_PREVIEW_CHARS: usize = 80;

const RULE_WIDTH: usize = 60;

pub fn print_header(total: usize, title: &str) {
    println!("Generating {} images for {}...", total, title);
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn print_item_start(index: usize, total: usize, spec: &PromptSpec) {
    println!();
    println!("[{}/{}] Generating: {}", index + 1, total, spec.name);
    println!("   Prompt: {}", prompt_preview(&spec.prompt));
}

pub fn print_outcome(outcome: &ItemOutcome) {
    match outcome {
        ItemOutcome::Generated(image) => {
            println!("   Success");
            println!("   Saved as: {}", image.file_name);
        }
        ItemOutcome::NoFileFound => {
            println!("   Success");
            println!("   No new image found in output directory");
        }
        ItemOutcome::Failed {
            exit_code: Some(code),
            stderr,
        } => println!("   Error (exit {}): {}", code, stderr.trim_end()),
        ItemOutcome::Failed {
            exit_code: None,
            stderr,
        } => println!("   Error (terminated by signal): {}", stderr.trim_end()),
        ItemOutcome::TimedOut { timeout_seconds } => {
            println!("   Timeout generating image (after {}s)", timeout_seconds)
        }
        ItemOutcome::InvocationError(message) => println!("   Exception: {}", message),
    }
}

pub fn print_summary(report: &BatchReport, output_dir: &Path) {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "Generated {}/{} images",
        report.generated_count(),
        report.total()
    );
    println!();
    println!("Images in: {}", output_dir.display());
}

pub fn print_gallery(path: &Path) {
    println!();
    println!("Preview gallery created: file://{}", path.display());
}

/// First [`PROMPT_PREVIEW_CHARS`] characters, with `...` when cut.
pub fn prompt_preview(prompt: &str) -> String {
    let mut chars = prompt.chars();
    let head: String = chars.by_ref().take(PROMPT_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
