//! Build and installer packaging for JUCE/CMake audio plugins.
//!
//! Every subcommand is split into planning and execution:
//!
//! 1. [`Bundler::plan`] turns [`Settings`] and a [`Job`] into a [`Plan`],
//!    inspecting the repository but never modifying it
//! 2. [`Executor::execute`] either reports the plan (dry run) or performs it
//!
//! # Example
//!
//! ```no_run
//! use plugin_bundler::bundler::{Bundler, Executor, Job, MacOsOptions, Reporter, SettingsBuilder};
//!
//! # async fn example(reporter: &dyn Reporter) -> plugin_bundler::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .repo_dir(".")
//!     .load_config(None)?
//!     .load_project_metadata()?
//!     .build()?;
//!
//! let job = Job::MacOs(MacOsOptions { archive: true, ..Default::default() });
//! let plan = Bundler::new(settings).plan(&job, true)?;
//! Executor::new(reporter, true).execute(&plan).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod error;
pub mod plan;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{Bundler, HostOs, Job};
pub use error::{Context, Error, ErrorExt, Result};
pub use plan::{Action, Executor, FileEncoding, Plan, Reporter, Step, ToolCommand};
pub use platform::{
    macos::MacOsOptions,
    windows::{asio::AsioOptions, inno::WindowsOptions},
};
pub use settings::{BundleSettings, InstallerPlatform, Settings, SettingsBuilder};
