//! Bundle configuration loaded from `bundler.toml`.

use super::{AsioSettings, MacOsSettings, WindowsSettings};
use crate::bundler::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = "bundler.toml";

/// Bundle configuration for all platforms.
///
/// Every field has a default, so the configuration file is optional.
///
/// # Configuration
///
/// ```toml
/// identifier_prefix = "com.ManosLabrakis"
/// resources_dir = "Scripts/resources"
///
/// [asio]
/// sdk_dir_name = "asiosdk_2.3.3_2019-06-14"
///
/// [windows]
/// app_id = "B2ABFFFD-7CF1-4DCB-B6A2-9B5714275278"
///
/// [macos]
/// icon = "Assets/ICON.png"
/// ```
///
/// # See Also
///
/// - [`AsioSettings`] - ASIO SDK location
/// - [`MacOsSettings`] - macOS installer configuration
/// - [`WindowsSettings`] - Windows installer configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleSettings {
    /// Reverse-domain prefix for macOS package identifiers.
    ///
    /// Packages are identified as `<prefix>.<app|vst3|au>.pkg.<name>`.
    ///
    /// Default: `com.ManosLabrakis`
    pub identifier_prefix: String,

    /// Directory holding `license.rtf`, `icon.bmp` and `banner.bmp`.
    ///
    /// Relative to the repository root.
    ///
    /// Default: `Scripts/resources`
    pub resources_dir: PathBuf,

    /// ASIO SDK settings.
    pub asio: AsioSettings,

    /// macOS installer settings.
    pub macos: MacOsSettings,

    /// Windows installer settings.
    pub windows: WindowsSettings,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            identifier_prefix: "com.ManosLabrakis".into(),
            resources_dir: PathBuf::from("Scripts").join("resources"),
            asio: AsioSettings::default(),
            macos: MacOsSettings::default(),
            windows: WindowsSettings::default(),
        }
    }
}

impl BundleSettings {
    /// Load configuration.
    ///
    /// An `explicit` path must exist. Without one, `<repo>/bundler.toml` is used
    /// when present and defaults otherwise.
    pub fn load(repo_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = repo_dir.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    log::debug!("No {} found, using defaults", candidate.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let text = std::fs::read_to_string(&path).fs_context("reading configuration", &path)?;
        let settings = Self::parse(&text, &path)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(settings)
    }

    /// Parse configuration text. `path` is only used for error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|error| Error::Config {
            path: path.to_path_buf(),
            error,
        })
    }
}
