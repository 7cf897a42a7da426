//! ASIO SDK settings.

/// Where to fetch the Steinberg ASIO SDK from and which directory it unpacks to.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AsioSettings {
    /// SDK download URL (a zip archive, redirects are followed).
    pub sdk_url: String,

    /// Top-level directory contained in the SDK archive.
    pub sdk_dir_name: String,
}

impl Default for AsioSettings {
    fn default() -> Self {
        Self {
            sdk_url: "https://www.steinberg.net/asiosdk".into(),
            sdk_dir_name: "asiosdk_2.3.3_2019-06-14".into(),
        }
    }
}
