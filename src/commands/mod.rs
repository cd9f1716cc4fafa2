//! Command implementations for imgbatch.
//!
//! This module routes CLI commands to their handlers and owns the shared
//! step of turning a config path plus CLI overrides into a validated
//! [`BatchConfig`] and its [`RunContext`].

mod gallery;
mod init;
mod list;
mod run;


use crate::cli::{Cli, Command, PathOverrides, RunArgs};
use crate::config::BatchConfig;
use crate::context::RunContext;
use crate::error::{ImgBatchError, Result};
use std::path::Path;

/// Dispatch a command to its implementation.
///
/// No subcommand means `run` with default arguments.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command.unwrap_or_else(|| Command::Run(RunArgs::default())) {
        Command::Run(args) => run::cmd_run(config_path, args),
        Command::List(args) => list::cmd_list(config_path, args),
        Command::Init(args) => init::cmd_init(args),
        Command::Gallery(args) => gallery::cmd_gallery(config_path, args),
    }
}

/// Load the batch config, apply path overrides, and resolve paths against
/// the current directory.
pub(crate) fn load(
    config_path: Option<&Path>,
    overrides: &PathOverrides,
) -> Result<(BatchConfig, RunContext)> {
    let cwd = std::env::current_dir().map_err(|e| {
        ImgBatchError::UserError(format!("failed to get current working directory: {}", e))
    })?;

    let (mut config, _) = BatchConfig::resolve(config_path, &cwd)?;
    apply_overrides(&mut config, overrides);
    config.validate()?;

    let ctx = RunContext::resolve_from(&config, &cwd);
    Ok((config, ctx))
}

fn apply_overrides(config: &mut BatchConfig, overrides: &PathOverrides) {
    if let Some(out_dir) = &overrides.out_dir {
        config.output_dir = out_dir.clone();
    }
    if let Some(tool) = &overrides.tool {
        config.tool.entry_point = tool.clone();
    }
}
