//! Configuration structures for bundling operations.
//!
//! This module provides the resolved [`Settings`] for one invocation, the
//! [`SettingsBuilder`] that assembles them, and the `bundler.toml`
//! configuration types for each platform.

mod asio;
mod builder;
mod bundle;
mod core;
mod macos;
mod windows;

// Re-export all public types
pub use asio::AsioSettings;
pub use builder::SettingsBuilder;
pub use bundle::{BundleSettings, CONFIG_FILE_NAME};
pub use core::{InstallerPlatform, Settings};
pub use macos::MacOsSettings;
pub use windows::WindowsSettings;
