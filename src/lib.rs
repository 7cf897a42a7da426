//! Build and installer packaging for JUCE/CMake audio plugins.
//!
//! This library provides:
//! - ASIO-enabled CMake builds on Windows (SDK download included)
//! - macOS installers (`pkgbuild`/`productbuild`, optional DMG)
//! - Windows installers (Inno Setup, optional zip)
//!
//! Every operation can be previewed with a dry run on any host. It can be
//! used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, Result};
