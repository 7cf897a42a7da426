//! Top-level error types for the command line tool.
//!
//! Library failures arrive as [`crate::bundler::Error`]; this layer adds
//! terminal output failures. Argument errors are reported by clap.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// IO errors (terminal output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}
