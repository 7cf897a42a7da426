//! Command line interface for plugin_bundler.
//!
//! This module provides the CLI for bundler operations, with argument
//! parsing, command execution, and user feedback.

mod args;
mod output;

pub use args::{Args, BuildAsioArgs, Command, MacosArgs, RuntimeConfig, WindowsArgs};
pub use output::OutputManager;

use crate::bundler::{Bundler, Executor, SettingsBuilder};
use crate::error::Result;
use clap::{CommandFactory, error::ErrorKind};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    if let Err(reason) = args.validate() {
        Args::command().error(ErrorKind::ValueValidation, reason).exit();
    }

    let config = RuntimeConfig::from(&args);
    execute(&args, &config).await?;
    Ok(0)
}

/// Plans and runs (or previews) the selected subcommand.
pub async fn execute(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let job = args.command.job();
    let dry_run = args.command.dry_run();

    for flag in args.command.ignored_flags() {
        config.warning_println(&format!("{} has no effect with --uninstall", flag))?;
    }

    let mut builder = SettingsBuilder::new()
        .repo_dir(&args.repo)
        .load_config(args.config.as_deref())?;
    if job.needs_project_metadata() {
        builder = builder
            .load_project_metadata()?
            .installer_name(args.command.installer_name().map(String::from));
    }
    let settings = builder.build()?;

    config.verbose_println(&format!(
        "Repository: {}",
        settings.repo_dir().display()
    ))?;

    let plan = Bundler::new(settings).plan(&job, dry_run)?;
    Executor::new(config.output(), dry_run)
        .execute(&plan)
        .await?;

    Ok(())
}
