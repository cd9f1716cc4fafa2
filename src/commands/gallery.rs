//! Implementation of the `imgbatch gallery` command.

use crate::cli::GalleryArgs;
use crate::error::Result;
use crate::gallery::{collect_existing, write_gallery};
use std::path::Path;

/// Rebuild the gallery from `<name>.<ext>` files already in the output
/// directory. The tool is not run and need not exist.
pub fn cmd_gallery(config_path: Option<&Path>, args: GalleryArgs) -> Result<()> {
    let (config, ctx) = super::load(config_path, &args.paths)?;

    let entries = collect_existing(&ctx, &config)?;
    if entries.is_empty() {
        println!(
            "No images found in {} for the configured prompts; gallery not written.",
            ctx.output_dir.display()
        );
        return Ok(());
    }

    let path = write_gallery(&ctx, &config, &entries)?;
    println!(
        "Gallery written with {}/{} images: file://{}",
        entries.len(),
        config.prompts.len(),
        path.display()
    );
    Ok(())
}
