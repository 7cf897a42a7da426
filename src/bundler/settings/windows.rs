//! Windows installer settings.

/// Inno Setup installer configuration.
///
/// # Configuration
///
/// Add to `bundler.toml`:
///
/// ```toml
/// [windows]
/// app_id = "B2ABFFFD-7CF1-4DCB-B6A2-9B5714275278"
/// inno_setup_url = "https://github.com/portapps/innosetup-portable/releases/download/6.2.0-5/innosetup-portable-win32-6.2.0-5.7z"
/// ```
///
/// The `app_id` must stay stable across releases: Inno Setup uses it to find
/// previous installations when upgrading or uninstalling.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowsSettings {
    /// Inno Setup `AppId` GUID, without braces.
    pub app_id: String,

    /// Portable Inno Setup archive (7z) downloaded when the toolset is missing.
    pub inno_setup_url: String,
}

impl Default for WindowsSettings {
    fn default() -> Self {
        Self {
            app_id: "B2ABFFFD-7CF1-4DCB-B6A2-9B5714275278".into(),
            inno_setup_url: "https://github.com/portapps/innosetup-portable/releases/download/6.2.0-5/innosetup-portable-win32-6.2.0-5.7z".into(),
        }
    }
}
