//! Batch generation: one tool run per prompt, then the gallery.
//!
//! The loop is strictly sequential. Each prompt moves through
//! requested → generated | failed | timed out | errored | no file, and the
//! run ends with or without a gallery depending on whether anything was
//! generated.

pub mod display;
mod outcome;
mod runner;

#[cfg(test)]
mod tests;

pub use outcome::{BatchReport, GeneratedImage, ItemOutcome, ItemReport};
pub use runner::{STDERR_EXCERPT_CHARS, run_batch};
