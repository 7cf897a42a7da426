//! macOS DMG disk image creation.
//!
//! Wraps the product archive in a disk image using the `create-dmg` shell
//! script, cloned next to the installers on first use.
//!
//! # DMG Naming Convention
//!
//! Format: `{InstallerName}-v{Version}-mac.dmg`, written to
//! `<repo>/Installers/macos`.

use crate::bundler::{
    plan::{Action, Plan, ToolCommand},
    settings::Settings,
};
use std::path::{Path, PathBuf};

/// Name of the staging directory whose contents become the image.
const STAGING_DIR: &str = "installer";

/// DMG file name for an installer name and version.
pub fn dmg_file_name(name: &str, version: &str) -> String {
    format!("{}-v{}-mac.dmg", name, version)
}

/// Location of the `create-dmg` checkout.
pub fn create_dmg_dir(installers_dir: &Path) -> PathBuf {
    installers_dir.join("create-dmg")
}

/// Adds the steps that stage `setup_pkg` and build the disk image.
///
/// # Process
///
/// 1. Empty or create the staging directory
/// 2. Copy the product archive into it
/// 3. Clone `create-dmg` unless the script is already present
/// 4. Remove a DMG left by a previous run
/// 5. Run `create-dmg`, then remove the staging directory
pub fn add_steps(
    plan: &mut Plan,
    settings: &Settings,
    installers_dir: &Path,
    setup_pkg: &str,
) -> crate::bundler::Result<()> {
    let name = settings.installer_name()?;
    let version = settings.version_string()?;
    let staging = installers_dir.join(STAGING_DIR);
    let dmg = installers_dir.join(dmg_file_name(&name, version));

    if staging.exists() {
        plan.step(
            "Setting up output directory...",
            Action::ClearDir(staging.clone()),
        );
    } else {
        plan.step(
            format!("Creating {}...", staging.display()),
            Action::CreateDir(staging.clone()),
        );
    }
    plan.then(Action::CopyFile {
        from: installers_dir.join(setup_pkg),
        to: staging.join(setup_pkg),
    });

    let checkout = create_dmg_dir(installers_dir);
    let script = checkout.join("create-dmg");
    if !script.is_file() {
        plan.step(
            "Fetching create-dmg...",
            Action::Run(
                ToolCommand::new("git")
                    .arg("clone")
                    .arg(&settings.bundle_settings().macos.create_dmg_repo)
                    .arg_path(&checkout),
            ),
        );
    }

    if dmg.exists() {
        plan.then(Action::RemoveFile(dmg.clone()));
    }

    plan.step(
        format!("Archiving as {}...", dmg.display()),
        Action::Run(
            ToolCommand::new("sh")
                .arg_path(&script)
                .arg("--volname")
                .arg(&name)
                .arg_path(&dmg)
                .arg_path(&staging),
        ),
    );
    plan.then(Action::RemoveDir(staging));

    Ok(())
}
