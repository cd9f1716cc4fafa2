//! Implementation of the `imgbatch list` command.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::gallery::caption_for;
use crate::tool::Invocation;
use std::path::Path;

/// Print the prompts in the batch and the command each would run.
pub fn cmd_list(config_path: Option<&Path>, args: ListArgs) -> Result<()> {
    let (config, ctx) = super::load(config_path, &args.paths)?;

    println!("{} prompts -> {}", config.prompts.len(), ctx.output_dir.display());
    println!();

    for (index, spec) in config.prompts.iter().enumerate() {
        println!("  {}. {}", index + 1, spec.name);
        println!(
            "     model: {}  style: {}  size: {}",
            spec.model,
            spec.style,
            spec.size.as_deref().unwrap_or("default")
        );
        println!("     caption: {}", caption_for(spec, &config));
        println!("     command: {}", Invocation::for_prompt(&config, &ctx, spec)?);
    }

    Ok(())
}
