//! Core Settings struct and implementations.

use super::BundleSettings;
use crate::bundler::{Context, Result};
use crate::metadata::ProjectMetadata;
use std::path::{Path, PathBuf};

/// Installer target, used to pick the output directory under `Installers/`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InstallerPlatform {
    /// macOS `.pkg` / `.dmg`
    MacOs,
    /// Windows Inno Setup `.exe` / `.zip`
    Windows,
}

impl InstallerPlatform {
    /// Directory name under `Installers/`.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
        }
    }
}

/// Main settings for bundler operations.
///
/// Central configuration for one invocation, constructed via
/// [`SettingsBuilder`](super::SettingsBuilder). Holds the repository root, the
/// loaded `bundler.toml`, and (for installer jobs) the project metadata parsed
/// from `CMakeLists.txt`.
///
/// # Examples
///
/// ```no_run
/// use plugin_bundler::bundler::SettingsBuilder;
///
/// # fn example() -> plugin_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .repo_dir("/path/to/plugin")
///     .load_project_metadata()?
///     .build()?;
/// println!("installer: {}", settings.installer_name()?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Absolute repository root.
    repo_dir: PathBuf,

    /// Configuration from `bundler.toml`.
    bundle_settings: BundleSettings,

    /// Metadata from `CMakeLists.txt`, absent for the ASIO build.
    project: Option<ProjectMetadata>,

    /// `--name` override for the installer name.
    installer_name: Option<String>,
}

impl Settings {
    /// Returns the repository root.
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Returns the bundle configuration.
    pub fn bundle_settings(&self) -> &BundleSettings {
        &self.bundle_settings
    }

    /// Returns the project metadata.
    ///
    /// # Errors
    ///
    /// Fails when the settings were built without loading `CMakeLists.txt`.
    pub fn project(&self) -> Result<&ProjectMetadata> {
        self.project
            .as_ref()
            .context("project metadata was not loaded from CMakeLists.txt")
    }

    /// Returns the product name.
    pub fn product_name(&self) -> Result<&str> {
        Ok(&self.project()?.product_name)
    }

    /// Returns the version string.
    pub fn version_string(&self) -> Result<&str> {
        Ok(&self.project()?.version)
    }

    /// Name used for package files, scripts and archives.
    ///
    /// The `--name` override when given, otherwise the product name. Spaces are
    /// removed either way.
    pub fn installer_name(&self) -> Result<String> {
        let raw = match &self.installer_name {
            Some(name) => name.as_str(),
            None => self.product_name()?,
        };
        Ok(raw.trim().replace(' ', ""))
    }

    /// JUCE artefacts directory: `<repo>/build/<project>_artefacts`.
    pub fn artefacts_dir(&self) -> Result<PathBuf> {
        Ok(self
            .repo_dir
            .join("build")
            .join(format!("{}_artefacts", self.project()?.project_name)))
    }

    /// Installer output directory: `<repo>/Installers/<platform>`.
    pub fn installers_dir(&self, platform: InstallerPlatform) -> PathBuf {
        self.repo_dir.join("Installers").join(platform.dir_name())
    }

    /// Installer resources directory (license, wizard images).
    pub fn resources_dir(&self) -> PathBuf {
        self.resolve(&self.bundle_settings.resources_dir)
    }

    /// Resolves a configured path against the repository root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.repo_dir.join(path)
        }
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        repo_dir: PathBuf,
        bundle_settings: BundleSettings,
        project: Option<ProjectMetadata>,
        installer_name: Option<String>,
    ) -> Self {
        Self {
            repo_dir,
            bundle_settings,
            project,
            installer_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;

    fn project() -> ProjectMetadata {
        ProjectMetadata {
            project_name: "NeuralAmpModeler".into(),
            version: "0.2.1".into(),
            product_name: "Neural Amp Modeler".into(),
            company_name: None,
        }
    }

    fn repo() -> PathBuf {
        std::env::temp_dir().join("plugin")
    }

    #[test]
    fn installer_name_strips_spaces_from_product() {
        let settings = SettingsBuilder::new()
            .repo_dir(repo())
            .project(project())
            .build()
            .unwrap();
        assert_eq!(settings.installer_name().unwrap(), "NeuralAmpModeler");
    }

    #[test]
    fn installer_name_override_is_trimmed_and_compacted() {
        let settings = SettingsBuilder::new()
            .repo_dir(repo())
            .project(project())
            .installer_name(Some("  NAM Beta ".into()))
            .build()
            .unwrap();
        assert_eq!(settings.installer_name().unwrap(), "NAMBeta");
    }

    #[test]
    fn derived_directories() {
        let settings = SettingsBuilder::new()
            .repo_dir(repo())
            .project(project())
            .build()
            .unwrap();
        assert_eq!(
            settings.artefacts_dir().unwrap(),
            repo().join("build").join("NeuralAmpModeler_artefacts")
        );
        assert_eq!(
            settings.installers_dir(InstallerPlatform::Windows),
            repo().join("Installers").join("windows")
        );
        assert_eq!(
            settings.resources_dir(),
            repo().join("Scripts").join("resources")
        );
    }

    #[test]
    fn project_is_required_for_installer_fields() {
        let settings = SettingsBuilder::new().repo_dir(repo()).build().unwrap();
        assert!(settings.project().is_err());
        assert!(settings.installer_name().is_err());
    }
}
