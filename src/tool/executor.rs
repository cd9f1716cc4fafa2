//! Tool subprocess executor.
//!
//! Runs one generation request with a timeout. stdout and stderr are
//! redirected to per-item log files rather than pipes, so a chatty tool can
//! never block on a full pipe while we poll for exit.

use super::invocation::Invocation;
use crate::error::{ImgBatchError, Result};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing the generation tool once.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Exit code of the process (None if killed or terminated by a signal).
    pub exit_code: Option<i32>,
    /// Path to the stdout log file.
    pub stdout_path: PathBuf,
    /// Path to the stderr log file.
    pub stderr_path: PathBuf,
    /// Duration of execution.
    pub duration: Duration,
    /// Whether the process was killed due to timeout.
    pub timed_out: bool,
    /// The command that was executed (for logging).
    pub command: String,
}

impl ToolResult {
    /// Check if the tool run was successful.
    pub fn is_success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// Captured stdout, empty if the log is unreadable.
    pub fn stdout(&self) -> String {
        read_lossy(&self.stdout_path)
    }

    /// The first `limit` characters of captured stderr.
    pub fn stderr_excerpt(&self, limit: usize) -> String {
        read_lossy(&self.stderr_path).chars().take(limit).collect()
    }
}

/// Execute `invocation`, capturing output under `logs_dir`.
///
/// Returns `Err` only when the process could not be started (log files not
/// creatable, program missing). A nonzero exit or a timeout is reported in
/// the returned [`ToolResult`].
pub fn execute_tool(
    invocation: &Invocation,
    logs_dir: &Path,
    timeout_seconds: u64,
) -> Result<ToolResult> {
    std::fs::create_dir_all(logs_dir).map_err(|e| {
        ImgBatchError::UserError(format!(
            "failed to create log directory '{}': {}",
            logs_dir.display(),
            e
        ))
    })?;

    let stdout_path = logs_dir.join("stdout.log");
    let stderr_path = logs_dir.join("stderr.log");

    let stdout_file = std::fs::File::create(&stdout_path).map_err(|e| {
        ImgBatchError::UserError(format!(
            "failed to create stdout log '{}': {}",
            stdout_path.display(),
            e
        ))
    })?;
    let stderr_file = std::fs::File::create(&stderr_path).map_err(|e| {
        ImgBatchError::UserError(format!(
            "failed to create stderr log '{}': {}",
            stderr_path.display(),
            e
        ))
    })?;

    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_file))
        .stderr(Stdio::from(stderr_file));

    let start_time = Instant::now();
    let mut child = command.spawn().map_err(|e| {
        ImgBatchError::UserError(format!(
            "failed to execute '{}': {}\nFix: ensure the interpreter is installed and in PATH.",
            invocation.program, e
        ))
    })?;

    let (exit_code, timed_out) =
        wait_with_timeout(&mut child, Duration::from_secs(timeout_seconds))?;

    Ok(ToolResult {
        exit_code,
        stdout_path,
        stderr_path,
        duration: start_time.elapsed(),
        timed_out,
        command: invocation.to_string(),
    })
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<(Option<i32>, bool)> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(100);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((status.code(), false)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    kill_process(child);
                    return Ok((None, true));
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                kill_process(child);
                return Err(ImgBatchError::UserError(format!(
                    "failed to check process status: {}",
                    e
                )));
            }
        }
    }
}

/// Kill a process and reap it.
fn kill_process(child: &mut Child) {
    // SIGKILL on Unix, TerminateProcess on Windows.
    let _ = child.kill();
    let _ = child.wait();
}

fn read_lossy(path: &Path) -> String {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}
