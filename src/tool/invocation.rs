//! Building the command line for one generation request.

use crate::config::{BatchConfig, PromptSpec};
use crate::context::RunContext;
use crate::error::Result;
use std::fmt;

/// A fully resolved tool command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to spawn.
    pub program: String,
    /// Arguments following the program.
    pub args: Vec<String>,
}

impl Invocation {
    /// Build the invocation for `spec`.
    ///
    /// The argument order is
    /// `[interpreter args..] <entry_point> --prompt --model --style --quality --out-dir [--size]`.
    /// With an empty interpreter the entry point itself is the program.
    pub fn for_prompt(config: &BatchConfig, ctx: &RunContext, spec: &PromptSpec) -> Result<Self> {
        let mut words = config.interpreter_args()?;
        words.push(ctx.tool_entry_point.to_string_lossy().to_string());

        words.extend([
            "--prompt".to_string(),
            spec.prompt.clone(),
            "--model".to_string(),
            spec.model.clone(),
            "--style".to_string(),
            spec.style.clone(),
            "--quality".to_string(),
            config.tool.quality.clone(),
            "--out-dir".to_string(),
            ctx.output_dir.to_string_lossy().to_string(),
        ]);

        if let Some(size) = &spec.size {
            words.push("--size".to_string());
            words.push(size.clone());
        }

        let program = words.remove(0);
        Ok(Self {
            program,
            args: words,
        })
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(&self.program).chain(self.args.iter());
        write!(f, "{}", shell_words::join(words))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin;
    use std::path::{Path, PathBuf};

    fn context(config: &BatchConfig) -> RunContext {
        RunContext::resolve_from(config, Path::new("/work"))
    }

    #[test]
    fn test_invocation_argument_order() {
        let mut config = builtin();
        config.tool.entry_point = PathBuf::from("/opt/gen.py");
        config.output_dir = PathBuf::from("/srv/images");
        let ctx = context(&config);
        let spec = PromptSpec::new("hero", "A lighthouse");

        let inv = Invocation::for_prompt(&config, &ctx, &spec).unwrap();

        assert_eq!(inv.program, "python3");
        assert_eq!(
            inv.args,
            vec![
                "/opt/gen.py",
                "--prompt",
                "A lighthouse",
                "--model",
                "dall-e-3",
                "--style",
                "vivid",
                "--quality",
                "hd",
                "--out-dir",
                "/srv/images",
            ]
        );
    }

    #[test]
    fn test_invocation_appends_size_last() {
        let mut config = builtin();
        config.tool.entry_point = PathBuf::from("/opt/gen.py");
        let ctx = context(&config);
        let spec = PromptSpec::new("bg", "A skyline").with_size("1792x1024");

        let inv = Invocation::for_prompt(&config, &ctx, &spec).unwrap();

        let tail: Vec<_> = inv.args.iter().rev().take(2).rev().cloned().collect();
        assert_eq!(tail, vec!["--size", "1792x1024"]);
    }

    #[test]
    fn test_invocation_interpreter_with_arguments() {
        let mut config = builtin();
        config.tool.interpreter = "uv run --quiet".to_string();
        config.tool.entry_point = PathBuf::from("/opt/gen.py");
        let ctx = context(&config);

        let inv = Invocation::for_prompt(&config, &ctx, &config.prompts[0]).unwrap();

        assert_eq!(inv.program, "uv");
        assert_eq!(&inv.args[..3], &["run", "--quiet", "/opt/gen.py"]);
    }

    #[test]
    fn test_invocation_without_interpreter_runs_entry_point() {
        let mut config = builtin();
        config.tool.interpreter = String::new();
        config.tool.entry_point = PathBuf::from("/opt/gen");
        let ctx = context(&config);

        let inv = Invocation::for_prompt(&config, &ctx, &config.prompts[0]).unwrap();

        assert_eq!(inv.program, "/opt/gen");
        assert_eq!(inv.args[0], "--prompt");
    }

    #[test]
    fn test_invocation_uses_configured_quality() {
        let mut config = builtin();
        config.tool.quality = "standard".to_string();
        let ctx = context(&config);

        let inv = Invocation::for_prompt(&config, &ctx, &config.prompts[0]).unwrap();

        let pos = inv.args.iter().position(|a| a == "--quality").unwrap();
        assert_eq!(inv.args[pos + 1], "standard");
    }

    #[test]
    fn test_invocation_display_quotes_prompt() {
        let mut config = builtin();
        config.tool.entry_point = PathBuf::from("/opt/gen.py");
        config.output_dir = PathBuf::from("/srv/images");
        let ctx = context(&config);
        let spec = PromptSpec::new("hero", "A lighthouse");

        let shown = Invocation::for_prompt(&config, &ctx, &spec)
            .unwrap()
            .to_string();

        assert!(shown.starts_with("python3 /opt/gen.py --prompt 'A lighthouse'"));
        assert!(shown.ends_with("--out-dir /srv/images"));
    }
}
