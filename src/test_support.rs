use crate::config::{BatchConfig, PromptSpec};
use crate::context::RunContext;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // The working directory is process-global; serialize changes to it.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A stand-in for the generation tool, run with `sh`.
///
/// Behaviour is keyed off the prompt text:
/// - contains `FAIL`: writes to stderr and exits 2
/// - contains `SLOW`: sleeps 5 seconds, then exits 0 without an image
/// - contains `NOFILE`: exits 0 without an image
/// - contains `ECHO`: prints `stdout.txt` (next to the script), exits 0 without an image
/// - contains `REPORT`: writes an image and prints `Saved: <path>`
/// - otherwise: writes `gen_<n>.png` into `--out-dir` and exits 0
///
/// Every call appends `<prompt>|<size>` to `calls.log` next to the script.
const STUB_TOOL: &str = r#"#!/bin/sh
here="$(dirname "$0")"
prompt=""
out=""
size=""
while [ $# -gt 0 ]; do
  case "$1" in
    --prompt) prompt="$2"; shift 2 ;;
    --out-dir) out="$2"; shift 2 ;;
    --size) size="$2"; shift 2 ;;
    *) shift ;;
  esac
done
printf '%s|%s\n' "$prompt" "$size" >> "$here/calls.log"
case "$prompt" in
  *FAIL*) echo "generation failed: content policy violation" >&2; exit 2 ;;
  *SLOW*) sleep 5; exit 0 ;;
  *NOFILE*) exit 0 ;;
  *ECHO*) cat "$here/stdout.txt" 2>/dev/null; exit 0 ;;
esac
n=$(cat "$here/counter" 2>/dev/null || echo 0)
n=$((n + 1))
echo "$n" > "$here/counter"
file="$out/gen_$n.png"
printf 'image %s' "$n" > "$file"
case "$prompt" in
  *REPORT*) echo "Saved: $file" ;;
esac
exit 0
"#;

/// A temp workspace with a stub tool and an output directory path.
pub(crate) struct StubWorkspace {
    pub(crate) temp: TempDir,
    pub(crate) tool: PathBuf,
}

impl StubWorkspace {
    pub(crate) fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let tool_dir = temp.path().join("tool");
        std::fs::create_dir_all(&tool_dir).unwrap();
        let tool = tool_dir.join("gen.sh");
        std::fs::write(&tool, STUB_TOOL).unwrap();
        Self { temp, tool }
    }

    pub(crate) fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Config pointing at the stub tool, writing into `<root>/site/images`.
    pub(crate) fn config(&self, prompts: Vec<PromptSpec>) -> BatchConfig {
        let mut config = BatchConfig {
            prompts,
            ..BatchConfig::default()
        };
        config.tool.interpreter = "sh".to_string();
        config.tool.entry_point = self.tool.clone();
        config.tool.timeout_seconds = 10;
        config.output_dir = self.root().join("site").join("images");
        config
    }

    pub(crate) fn context(&self, config: &BatchConfig) -> RunContext {
        RunContext::resolve_from(config, self.root())
    }

    /// Set what the stub prints for `ECHO` prompts.
    pub(crate) fn set_stdout(&self, text: &str) {
        std::fs::write(self.tool.with_file_name("stdout.txt"), text).unwrap();
    }

    /// Lines of `calls.log`, one per tool invocation.
    pub(crate) fn calls(&self) -> Vec<String> {
        let log = self.tool.with_file_name("calls.log");
        std::fs::read_to_string(log)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// Sorted file names directly inside `dir` (directories excluded).
pub(crate) fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
