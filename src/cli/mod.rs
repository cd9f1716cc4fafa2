//! CLI argument parsing for imgbatch.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// imgbatch: run an image-generation CLI over a batch of prompts.
///
/// Each prompt is sent to the external tool in turn; the image it writes is
/// renamed to `<name>.<ext>` and a static HTML gallery of the results is
/// written next to the output directory.
#[derive(Parser, Debug)]
#[command(name = "imgbatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Batch config file (default: ./imgbatch.yaml if present, else the built-in batch).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run (default: `run`).
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for imgbatch.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate every prompt in the batch and write the gallery.
    ///
    /// Items that fail or time out are reported and skipped; the run
    /// exits 0 unless the tool itself is missing.
    Run(RunArgs),

    /// List the prompts in the batch and the command each would run.
    List(ListArgs),

    /// Write the built-in batch as an editable config file.
    Init(InitArgs),

    /// Rebuild the gallery from images already in the output directory.
    Gallery(GalleryArgs),
}

/// Path overrides shared by commands that touch the output directory.
#[derive(Args, Debug, Default, Clone)]
pub struct PathOverrides {
    /// Output directory (overrides `output_dir`).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Tool entry point (overrides `tool.entry_point`).
    #[arg(long)]
    pub tool: Option<PathBuf>,
}

/// Arguments for the `run` command.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub paths: PathOverrides,

    /// Per-invocation timeout in seconds (overrides `tool.timeout_seconds`).
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Print each invocation without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `list` command.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub paths: PathOverrides,
}

/// Arguments for the `init` command.
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Where to write the config (default: ./imgbatch.yaml).
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `gallery` command.
#[derive(Args, Debug, Default)]
pub struct GalleryArgs {
    #[command(flatten)]
    pub paths: PathOverrides,
}
