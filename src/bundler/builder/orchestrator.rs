//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that turns a [`Job`]
//! into a [`Plan`] for the matching platform module, enforcing the host
//! operating system each job needs when it will actually run.

use crate::bundler::{
    Result, Settings,
    error::Error,
    plan::Plan,
    platform::{
        macos::{self, MacOsOptions},
        windows::{
            asio::{self, AsioOptions},
            inno::{self, WindowsOptions},
        },
    },
};

/// Host operating system a job runs on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostOs {
    /// Apple macOS
    MacOs,
    /// Microsoft Windows
    Windows,
    /// Anything else
    Other,
}

impl HostOs {
    /// The operating system this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Other
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
            Self::Other => "this host",
        }
    }
}

/// One subcommand with its flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Job {
    /// Download the ASIO SDK and build with CMake.
    BuildAsio(AsioOptions),
    /// Generate the macOS installer.
    MacOs(MacOsOptions),
    /// Generate the Windows installer.
    Windows(WindowsOptions),
}

impl Job {
    /// Subcommand name, used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BuildAsio(_) => "build-asio",
            Self::MacOs(_) => "macos",
            Self::Windows(_) => "windows",
        }
    }

    /// Host required to run the job for real.
    pub fn required_host(&self) -> HostOs {
        match self {
            Self::BuildAsio(_) | Self::Windows(_) => HostOs::Windows,
            Self::MacOs(_) => HostOs::MacOs,
        }
    }

    /// Whether the job reads `CMakeLists.txt`.
    pub fn needs_project_metadata(&self) -> bool {
        !matches!(self, Self::BuildAsio(_))
    }
}

/// Main bundler orchestrator.
///
/// Dispatches a [`Job`] to its platform planner.
///
/// # Examples
///
/// ```no_run
/// use plugin_bundler::bundler::{Bundler, Job, SettingsBuilder, WindowsOptions};
///
/// # fn example() -> plugin_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .repo_dir(".")
///     .load_project_metadata()?
///     .build()?;
/// let bundler = Bundler::new(settings);
/// let plan = bundler.plan(&Job::Windows(WindowsOptions { archive: true }), true)?;
/// for command in plan.commands() {
///     println!("{command}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
    host: HostOs,
}

impl Bundler {
    /// Creates a bundler for the current host.
    pub fn new(settings: Settings) -> Self {
        Self::with_host(settings, HostOs::current())
    }

    /// Creates a bundler that assumes `host`.
    pub fn with_host(settings: Settings, host: HostOs) -> Self {
        Self { settings, host }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Plans `job`.
    ///
    /// Unless `dry_run` is set, fails with [`Error::UnsupportedHost`] when the
    /// host cannot run the job's tools.
    pub fn plan(&self, job: &Job, dry_run: bool) -> Result<Plan> {
        let required = job.required_host();
        if !dry_run && self.host != required {
            return Err(Error::UnsupportedHost {
                operation: job.name(),
                required: required.name(),
            });
        }

        log::debug!("Planning {} (dry run: {})", job.name(), dry_run);
        match job {
            Job::BuildAsio(options) => asio::plan(&self.settings, options),
            Job::MacOs(options) => macos::plan(&self.settings, options),
            Job::Windows(options) => inno::plan(&self.settings, options),
        }
    }
}
