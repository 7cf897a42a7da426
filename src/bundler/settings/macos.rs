//! macOS installer settings.

use std::path::PathBuf;

/// macOS installer (`pkg` + optional `dmg`) configuration.
///
/// # Configuration
///
/// Add to `bundler.toml`:
///
/// ```toml
/// [macos]
/// icon = "Assets/ICON.png"
/// host_architectures = ["arm64", "x86_64"]
/// create_dmg_repo = "https://github.com/create-dmg/create-dmg"
/// ```
///
/// # See Also
///
/// - [`WindowsSettings`](super::WindowsSettings) - Windows installer configuration
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacOsSettings {
    /// PNG stamped onto the installer package as its Finder icon.
    ///
    /// Relative paths resolve against the repository root.
    ///
    /// Default: `Assets/ICON.png`
    pub icon: PathBuf,

    /// Value of `hostArchitectures` in the distribution XML.
    ///
    /// Default: `["arm64", "x86_64"]`
    pub host_architectures: Vec<String>,

    /// Git repository cloned to obtain the `create-dmg` script.
    ///
    /// Default: `https://github.com/create-dmg/create-dmg`
    pub create_dmg_repo: String,
}

impl Default for MacOsSettings {
    fn default() -> Self {
        Self {
            icon: PathBuf::from("Assets").join("ICON.png"),
            host_architectures: vec!["arm64".into(), "x86_64".into()],
            create_dmg_repo: "https://github.com/create-dmg/create-dmg".into(),
        }
    }
}
