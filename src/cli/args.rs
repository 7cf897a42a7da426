//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation and
//! the conversion of subcommands into bundler jobs.

use crate::bundler::{AsioOptions, Job, MacOsOptions, WindowsOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build and installer packaging for JUCE/CMake audio plugins
#[derive(Parser, Debug)]
#[command(
    name = "plugin_bundler",
    version,
    about = "Build and installer packaging for JUCE/CMake audio plugins",
    long_about = "Builds the plugin against the Steinberg ASIO SDK and generates the macOS \
(pkg/dmg) and Windows (Inno Setup) installers from the project's CMakeLists.txt.

Usage:
  plugin_bundler build-asio --native
  plugin_bundler --repo ../MyPlugin macos --archive
  plugin_bundler windows --name \"My Plugin Beta\" --dryrun

Every subcommand accepts --dryrun to print the plan without running it."
)]
pub struct Args {
    /// Plugin repository root (the directory holding CMakeLists.txt)
    #[arg(
        long,
        global = true,
        env = "PLUGIN_BUNDLER_REPO",
        default_value = ".",
        value_name = "DIR"
    )]
    pub repo: PathBuf,

    /// Configuration file (defaults to <repo>/bundler.toml when present)
    #[arg(long, global = true, env = "PLUGIN_BUNDLER_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the ASIO SDK when missing, then build with CMake (Windows)
    #[command(name = "build-asio")]
    BuildAsio(BuildAsioArgs),

    /// Generate the macOS installer package
    Macos(MacosArgs),

    /// Generate the Windows Inno Setup installer
    Windows(WindowsArgs),
}

/// Flags of `build-asio`.
#[derive(clap::Args, Debug)]
pub struct BuildAsioArgs {
    /// Print the plan without running it
    #[arg(short, long)]
    pub dryrun: bool,

    /// Use native CPU architecture optimizations
    #[arg(short, long)]
    pub native: bool,

    /// Prebuilt JUCE library path
    #[arg(short, long, value_name = "PATH")]
    pub prefix: Option<PathBuf>,
}

/// Flags of `macos`.
#[derive(clap::Args, Debug)]
pub struct MacosArgs {
    /// Print the plan without running it
    #[arg(short, long)]
    pub dryrun: bool,

    /// Clear the Release artefacts after the installer is generated
    #[arg(short, long)]
    pub clear: bool,

    /// Override the installer name (spaces are removed)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Wrap the installer in a DMG
    #[arg(short, long)]
    pub archive: bool,

    /// Only generate the uninstall script
    #[arg(short, long)]
    pub uninstall: bool,
}

/// Flags of `windows`.
#[derive(clap::Args, Debug)]
pub struct WindowsArgs {
    /// Print the plan without running it
    #[arg(short, long)]
    pub dryrun: bool,

    /// Override the installer name (spaces are removed)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Zip the compiled installer
    #[arg(short, long)]
    pub archive: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.repo.as_os_str().is_empty() {
            return Err("Repository path cannot be empty".to_string());
        }

        if let Some(name) = self.command.installer_name()
            && name.trim().is_empty()
        {
            return Err("Installer name cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Command {
    /// Whether to only print the plan.
    pub fn dry_run(&self) -> bool {
        match self {
            Self::BuildAsio(args) => args.dryrun,
            Self::Macos(args) => args.dryrun,
            Self::Windows(args) => args.dryrun,
        }
    }

    /// The `--name` override, if any.
    pub fn installer_name(&self) -> Option<&str> {
        match self {
            Self::BuildAsio(_) => None,
            Self::Macos(args) => args.name.as_deref(),
            Self::Windows(args) => args.name.as_deref(),
        }
    }

    /// Flags that have no effect in combination with others.
    pub fn ignored_flags(&self) -> Vec<&'static str> {
        match self {
            Self::Macos(args) if args.uninstall => [
                (args.clear, "--clear"),
                (args.archive, "--archive"),
            ]
            .into_iter()
            .filter_map(|(set, flag)| set.then_some(flag))
            .collect(),
            _ => Vec::new(),
        }
    }

    /// The bundler job for this subcommand.
    pub fn job(&self) -> Job {
        match self {
            Self::BuildAsio(args) => Job::BuildAsio(AsioOptions {
                native: args.native,
                prefix: args.prefix.clone(),
            }),
            Self::Macos(args) => Job::MacOs(MacOsOptions {
                clear: args.clear,
                archive: args.archive,
                uninstall: args.uninstall,
            }),
            Self::Windows(args) => Job::Windows(WindowsOptions {
                archive: args.archive,
            }),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output =
            super::OutputManager::new(log::log_enabled!(log::Level::Debug), args.quiet);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("plugin_bundler").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn build_asio_flags() {
        let args = parse(&["build-asio", "-d", "-n", "-p", "C:/JUCE"]);
        assert!(args.command.dry_run());
        assert_eq!(
            args.command.job(),
            Job::BuildAsio(AsioOptions {
                native: true,
                prefix: Some(PathBuf::from("C:/JUCE")),
            })
        );
    }

    #[test]
    fn macos_short_flags() {
        let args = parse(&["macos", "-c", "-a", "-n", "NAM Beta"]);
        assert!(!args.command.dry_run());
        assert_eq!(args.command.installer_name(), Some("NAM Beta"));
        assert_eq!(
            args.command.job(),
            Job::MacOs(MacOsOptions {
                clear: true,
                archive: true,
                uninstall: false,
            })
        );
    }

    #[test]
    fn global_options_after_subcommand() {
        let args = parse(&["windows", "--dryrun", "--repo", "/tmp/plugin", "--archive"]);
        assert_eq!(args.repo, PathBuf::from("/tmp/plugin"));
        assert_eq!(args.command.job(), Job::Windows(WindowsOptions { archive: true }));
    }

    #[test]
    fn blank_name_is_invalid() {
        let args = parse(&["windows", "--name", "   "]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn quiet_is_global() {
        let args = parse(&["macos", "--dryrun", "-q"]);
        assert!(args.quiet);
        assert!(!parse(&["macos"]).quiet);
    }

    #[test]
    fn uninstall_ignores_packaging_flags() {
        let args = parse(&["macos", "-u", "-a"]);
        assert_eq!(args.command.ignored_flags(), vec!["--archive"]);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["plugin_bundler", "linux"]).is_err());
    }
}
