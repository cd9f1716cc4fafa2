//! Exit code constants for the imgbatch CLI.
//!
//! - 0: Success (including runs where some items failed)
//! - 1: User error (missing tool entry point, bad config, unwritable output)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: missing tool, invalid configuration, or filesystem failure
/// outside the per-item loop.
pub const USER_ERROR: i32 = 1;
