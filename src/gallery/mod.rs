//! Static HTML gallery of the images a batch produced.
//!
//! The page is written next to the output directory (one level up) and
//! references images relative to itself, so the directory pair can be served
//! or opened from disk as-is.

mod render;

pub use render::{escape_html, render_gallery};

use crate::config::{BatchConfig, PromptSpec};
use crate::context::RunContext;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// One card on the gallery page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    /// Prompt name the image belongs to.
    pub name: String,
    /// File name inside the output directory.
    pub file_name: String,
    /// Card heading and `alt` text.
    pub caption: String,
}

impl GalleryEntry {
    pub fn for_prompt(
        spec: &PromptSpec,
        file_name: impl Into<String>,
        config: &BatchConfig,
    ) -> Self {
        Self {
            name: spec.name.clone(),
            file_name: file_name.into(),
            caption: caption_for(spec, config),
        }
    }
}

/// The caption for a prompt, falling back to `gallery.default_caption`.
pub fn caption_for(spec: &PromptSpec, config: &BatchConfig) -> String {
    spec.caption
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| config.gallery.default_caption.clone())
}

/// Render and atomically write the gallery. Returns the written path.
pub fn write_gallery(
    ctx: &RunContext,
    config: &BatchConfig,
    entries: &[GalleryEntry],
) -> Result<PathBuf> {
    let html = render_gallery(&config.gallery.title, &ctx.gallery_src_prefix(), entries);
    crate::fs::atomic_write_file(&ctx.gallery_path, &html)?;
    Ok(ctx.gallery_path.clone())
}

/// Gallery entries for images already present under their prompt names.
///
/// For each prompt (in order) the output directory is searched for
/// `<name>.<ext>` matching the image patterns. Used to rebuild the page
/// without running the tool.
pub fn collect_existing(ctx: &RunContext, config: &BatchConfig) -> Result<Vec<GalleryEntry>> {
    let globs = config.image_globs()?;
    let Ok(dir) = std::fs::read_dir(&ctx.output_dir) else {
        return Ok(Vec::new());
    };

    let mut files: Vec<String> = dir
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| globs.is_match(Path::new(name)))
        .collect();
    files.sort();

    let entries = config
        .prompts
        .iter()
        .filter_map(|spec| {
            files
                .iter()
                .find(|file| {
                    Path::new(file).file_stem().and_then(|s| s.to_str()) == Some(spec.name.as_str())
                })
                .map(|file| GalleryEntry::for_prompt(spec, file.clone(), config))
        })
        .collect();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(temp: &TempDir) -> (BatchConfig, RunContext) {
        let mut config = crate::config::builtin();
        config.output_dir = temp.path().join("site").join("images");
        let ctx = RunContext::resolve_from(&config, temp.path());
        (config, ctx)
    }

    #[test]
    fn test_caption_for_prefers_prompt_caption() {
        let config = crate::config::builtin();
        let spec = PromptSpec::new("hero", "x").with_caption("Hero");
        assert_eq!(caption_for(&spec, &config), "Hero");
    }

    #[test]
    fn test_caption_for_falls_back_to_default() {
        let config = crate::config::builtin();
        let spec = PromptSpec::new("unknown", "x");
        assert_eq!(caption_for(&spec, &config), "Cartel-themed image");

        let blank = PromptSpec::new("blank", "x").with_caption("  ");
        assert_eq!(caption_for(&blank, &config), "Cartel-themed image");
    }

    #[test]
    fn test_write_gallery_next_to_output_dir() {
        let temp = TempDir::new().unwrap();
        let (config, ctx) = setup(&temp);
        let entries = vec![GalleryEntry::for_prompt(
            &config.prompts[0],
            "cartel_commander.png",
            &config,
        )];

        let path = write_gallery(&ctx, &config, &entries).unwrap();

        assert_eq!(path, temp.path().join("site").join("image_gallery.html"));
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("src=\"images/cartel_commander.png\""));
        assert!(html.contains("Digital Cartel Commander Avatar"));
        assert!(html.contains("Cartel Image Gallery - Pablo Escobot"));
    }

    #[test]
    fn test_collect_existing_follows_prompt_order() {
        let temp = TempDir::new().unwrap();
        let (config, ctx) = setup(&temp);
        ctx.ensure_output_dir().unwrap();
        std::fs::write(ctx.output_dir.join("cartel_logo.webp"), b"x").unwrap();
        std::fs::write(ctx.output_dir.join("cartel_commander.png"), b"x").unwrap();
        std::fs::write(ctx.output_dir.join("cartel_commander.txt"), b"x").unwrap();
        std::fs::write(ctx.output_dir.join("unrelated.png"), b"x").unwrap();

        let entries = collect_existing(&ctx, &config).unwrap();

        let files: Vec<_> = entries.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(files, vec!["cartel_commander.png", "cartel_logo.webp"]);
        assert_eq!(entries[1].caption, "Cartel Logo Concept");
    }

    #[test]
    fn test_collect_existing_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let (config, ctx) = setup(&temp);
        assert!(collect_existing(&ctx, &config).unwrap().is_empty());
    }
}
