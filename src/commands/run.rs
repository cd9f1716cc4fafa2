//! Implementation of the `imgbatch run` command.

use crate::batch::{display::prompt_preview, run_batch};
use crate::cli::RunArgs;
use crate::config::BatchConfig;
use crate::context::RunContext;
use crate::error::Result;
use crate::tool::Invocation;
use std::path::Path;

/// Execute the `imgbatch run` command.
///
/// 1. Loads the batch config and applies CLI overrides
/// 2. Checks the tool entry point exists (exit 1 if not)
/// 3. Runs every prompt, then writes the gallery if anything was produced
///
/// Per-item failures do not change the exit code.
pub fn cmd_run(config_path: Option<&Path>, args: RunArgs) -> Result<()> {
    let (mut config, ctx) = super::load(config_path, &args.paths)?;
    if let Some(timeout) = args.timeout_seconds {
        config.tool.timeout_seconds = timeout;
        config.validate()?;
    }

    if args.dry_run {
        return print_dry_run(&config, &ctx);
    }

    run_batch(&config, &ctx)?;
    Ok(())
}

fn print_dry_run(config: &BatchConfig, ctx: &RunContext) -> Result<()> {
    println!("Dry run - no commands will be executed");
    println!();
    println!("  Tool:       {}", ctx.tool_entry_point.display());
    if ctx.require_tool().is_err() {
        println!("              (missing: a real run would exit with an error)");
    }
    println!("  Output:     {}", ctx.output_dir.display());
    println!("  Gallery:    {}", ctx.gallery_path.display());
    println!("  Timeout:    {}s", config.tool.timeout_seconds);
    println!();

    let total = config.prompts.len();
    for (index, spec) in config.prompts.iter().enumerate() {
        let invocation = Invocation::for_prompt(config, ctx, spec)?;
        println!("[{}/{}] {}", index + 1, total, spec.name);
        println!("   Prompt:  {}", prompt_preview(&spec.prompt));
        println!("   Command: {}", invocation);
    }

    Ok(())
}
