//! Implementation of the `imgbatch init` command.

use crate::cli::InitArgs;
use crate::config::{DEFAULT_CONFIG_FILE, builtin};
use crate::error::{ImgBatchError, Result};
use crate::fs::atomic_write_file;
use std::path::PathBuf;

const HEADER: &str = "\
# imgbatch batch config.
# Each prompt is sent to the tool as:
#   <interpreter> <entry_point> --prompt .. --model .. --style .. --quality .. --out-dir .. [--size WxH]
# The produced image is renamed to <name>.<ext> inside output_dir.
";

/// Write the built-in batch to `imgbatch.yaml` (or `--path`).
pub fn cmd_init(args: InitArgs) -> Result<()> {
    let path = args
        .path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if path.exists() && !args.force {
        return Err(ImgBatchError::UserError(format!(
            "'{}' already exists\nFix: pass --force to overwrite it.",
            path.display()
        )));
    }

    let yaml = builtin().to_yaml()?;
    atomic_write_file(&path, &format!("{}{}", HEADER, yaml))?;

    println!("Wrote {}", path.display());
    println!("Edit `tool.entry_point` to point at your generation script, then run `imgbatch run`.");
    Ok(())
}
