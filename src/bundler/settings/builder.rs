//! Builder for constructing Settings.

use super::{BundleSettings, Settings};
use crate::bundler::{Context, ErrorExt, Result};
use crate::metadata::{self, ProjectMetadata};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use plugin_bundler::bundler::SettingsBuilder;
///
/// # fn example() -> plugin_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .repo_dir(".")
///     .load_config(None)?
///     .load_project_metadata()?
///     .installer_name(Some("NAM".into()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    repo_dir: Option<PathBuf>,
    bundle_settings: BundleSettings,
    project: Option<ProjectMetadata>,
    installer_name: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the plugin repository root (the directory holding `CMakeLists.txt`).
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn repo_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.repo_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets bundle configuration.
    ///
    /// Default: [`BundleSettings::default`]
    pub fn bundle_settings(mut self, settings: BundleSettings) -> Self {
        self.bundle_settings = settings;
        self
    }

    /// Loads bundle configuration from `explicit` or `<repo>/bundler.toml`.
    ///
    /// Requires [`repo_dir`](Self::repo_dir) to be set first.
    pub fn load_config(mut self, explicit: Option<&Path>) -> Result<Self> {
        let repo_dir = self
            .repo_dir
            .as_deref()
            .context("repo_dir must be set before loading configuration")?;
        self.bundle_settings = BundleSettings::load(repo_dir, explicit)?;
        Ok(self)
    }

    /// Sets project metadata directly.
    pub fn project(mut self, project: ProjectMetadata) -> Self {
        self.project = Some(project);
        self
    }

    /// Parses `<repo>/CMakeLists.txt` into project metadata.
    ///
    /// Requires [`repo_dir`](Self::repo_dir) to be set first.
    pub fn load_project_metadata(mut self) -> Result<Self> {
        let repo_dir = self
            .repo_dir
            .as_deref()
            .context("repo_dir must be set before loading CMakeLists.txt")?;
        self.project = Some(metadata::load_project_metadata(repo_dir)?);
        Ok(self)
    }

    /// Overrides the installer name (`--name`).
    ///
    /// Default: None (derived from the product name)
    pub fn installer_name(mut self, name: Option<String>) -> Self {
        self.installer_name = name;
        self
    }

    /// Builds the settings.
    ///
    /// The repository root is made absolute so every generated path and
    /// command line is independent of the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `repo_dir` is missing or cannot be made absolute.
    pub fn build(self) -> Result<Settings> {
        let repo_dir = self.repo_dir.context("repo_dir is required")?;
        let repo_dir = repo_dir
            .absolutize()
            .fs_context("resolving repository root", &repo_dir)?
            .into_owned();

        Ok(Settings::new(
            repo_dir,
            self.bundle_settings,
            self.project,
            self.installer_name,
        ))
    }
}
