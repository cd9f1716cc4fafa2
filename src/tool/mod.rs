//! External generation tool invocation.
//!
//! - Command-line construction from a prompt and the batch config
//! - Subprocess execution with timeout and process termination
//! - Output capture to per-item log files

mod executor;
mod invocation;

pub use executor::{ToolResult, execute_tool};
pub use invocation::Invocation;
