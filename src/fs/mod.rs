//! Filesystem utilities for imgbatch.
//!
//! Atomic writes for the gallery and scaffolded config, and a rename helper
//! used when claiming generated images.

pub mod atomic;
mod move_file;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
pub use move_file::move_file;
