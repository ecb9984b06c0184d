//! Utility functions for common operations.
//!
//! - **Text processing**: Unicode-aware width calculation and word wrapping
//! - **Links**: the relative-suffix join used for blog index links
//! - **Files**: atomic write-then-rename

mod fs;
mod link;
mod text;

pub use fs::atomic_write;
pub use link::join_relative;
pub use text::{display_width, wrap_line};
