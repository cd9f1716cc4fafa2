//! Config loading, validation, and utility operations.

use super::model::BatchConfig;
use super::preset;
use crate::error::{ImgBatchError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "imgbatch.yaml";

/// Accepted form of a prompt's `size`.
const SIZE_PATTERN: &str = r"^[1-9][0-9]*x[1-9][0-9]*$";

impl BatchConfig {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ImgBatchError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the config for a command invocation.
    ///
    /// An explicit path must exist. Without one, `imgbatch.yaml` in `cwd` is
    /// used when present, otherwise the built-in batch.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Ok((Self::load(&candidate)?, Some(candidate)));
        }

        Ok((preset::builtin(), None))
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: BatchConfig = serde_yaml::from_str(yaml)
            .map_err(|e| ImgBatchError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ImgBatchError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - at least one prompt
    /// - prompt names are non-empty, unique, and usable as a file stem
    /// - `size`, when set, is `<width>x<height>`
    /// - timeout and freshness window are positive
    /// - image patterns compile and the interpreter parses
    pub fn validate(&self) -> Result<()> {
        if self.prompts.is_empty() {
            return Err(invalid("prompts must contain at least one entry".to_string()));
        }

        let size_re = Regex::new(SIZE_PATTERN)
            .map_err(|e| invalid(format!("failed to compile size pattern: {}", e)))?;

        let mut seen = HashSet::new();
        for spec in &self.prompts {
            validate_name(&spec.name)?;
            if !seen.insert(spec.name.as_str()) {
                return Err(invalid(format!("duplicate prompt name '{}'", spec.name)));
            }
            if spec.prompt.trim().is_empty() {
                return Err(invalid(format!("prompt '{}' has empty prompt text", spec.name)));
            }
            if let Some(size) = &spec.size
                && !size_re.is_match(size)
            {
                return Err(invalid(format!(
                    "prompt '{}' has invalid size '{}' (expected WIDTHxHEIGHT, e.g. 1024x1024)",
                    spec.name, size
                )));
            }
        }

        if self.tool.timeout_seconds == 0 {
            return Err(invalid("tool.timeout_seconds must be greater than 0".to_string()));
        }
        if self.freshness_seconds == 0 {
            return Err(invalid("freshness_seconds must be greater than 0".to_string()));
        }
        if self.gallery.file_name.trim().is_empty() {
            return Err(invalid("gallery.file_name must be non-empty".to_string()));
        }

        self.image_globs()?;
        self.interpreter_args()?;

        Ok(())
    }

    /// Compile `image_patterns` into a case-insensitive glob set.
    pub fn image_globs(&self) -> Result<GlobSet> {
        if self.image_patterns.is_empty() {
            return Err(invalid("image_patterns must contain at least one glob".to_string()));
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &self.image_patterns {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| invalid(format!("invalid image pattern '{}': {}", pattern, e)))?;
            builder.add(glob);
        }

        builder
            .build()
            .map_err(|e| invalid(format!("failed to build image patterns: {}", e)))
    }

    /// The interpreter split into program and leading arguments.
    pub fn interpreter_args(&self) -> Result<Vec<String>> {
        shell_words::split(&self.tool.interpreter).map_err(|e| {
            invalid(format!(
                "failed to parse tool.interpreter '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.tool.interpreter, e
            ))
        })
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid("prompt names must be non-empty".to_string()));
    }
    if name.starts_with('.') || name.contains(['/', '\\']) || name.contains('\0') {
        return Err(invalid(format!(
            "prompt name '{}' must not start with '.' or contain path separators",
            name
        )));
    }
    Ok(())
}

fn invalid(msg: String) -> ImgBatchError {
    ImgBatchError::UserError(format!("config validation failed: {}", msg))
}
