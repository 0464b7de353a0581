//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - The per-run log file

pub mod error;
pub mod log_sink;

// Re-export commonly used items
pub use error::{FilterError, FilterResult};
pub use log_sink::{log_file_path, LogSink};
