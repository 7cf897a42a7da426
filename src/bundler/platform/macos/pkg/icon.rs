//! Finder icon stamping for the product archive.
//!
//! A flat `.pkg` has no bundle to carry an icon, so the icon goes into the
//! file's resource fork: `sips` converts the PNG to icns, `Rez` appends it
//! as resource `-16455` and `SetFile -a C` sets the custom-icon flag. Every
//! step is optional; a missing Xcode tool leaves a working but plain pkg.

use crate::bundler::{
    plan::{Action, FileEncoding, Plan, ToolCommand},
    settings::Settings,
};
use std::path::Path;

/// Resource ID of the custom icon in a file's resource fork.
const CUSTOM_ICON_RESOURCE_ID: i32 = -16455;

/// Adds the icon steps for `<installers_dir>/<setup_pkg>`.
///
/// Skips with a warning when the configured icon does not exist.
pub fn add_steps(plan: &mut Plan, settings: &Settings, installers_dir: &Path, setup_pkg: &str) {
    let icon = settings.resolve(&settings.bundle_settings().macos.icon);
    if !icon.is_file() {
        plan.warn(format!(
            "Installer icon {} not found, skipping icon stamping",
            icon.display()
        ));
        return;
    }

    let icns = installers_dir.join("tmp.icns");
    let rsrc = installers_dir.join("tmpicns.rsrc");

    plan.step(
        "Setting installer icon...",
        Action::Run(
            ToolCommand::new("sips")
                .args(["-z", "128", "128"])
                .arg_path(&icon)
                .args(["-s", "format", "icns", "--out"])
                .arg_path(&icns),
        ),
    )
    .optional();
    plan.then(Action::WriteFile {
        path: rsrc,
        label: "ICON RESOURCE".into(),
        contents: format!(
            "read 'icns' ({}) \"{}\";\n",
            CUSTOM_ICON_RESOURCE_ID,
            icns.display()
        ),
        encoding: FileEncoding::Utf8,
        executable: false,
    })
    .optional();
    plan.then(Action::Run(
        ToolCommand::new("Rez")
            .args(["-a", "tmpicns.rsrc", "-o", setup_pkg])
            .current_dir(installers_dir),
    ))
    .optional();
    plan.then(Action::Run(
        ToolCommand::new("SetFile")
            .args(["-a", "C", setup_pkg])
            .current_dir(installers_dir),
    ))
    .optional();
    plan.then(Action::RemoveFile(icns)).optional();
    plan.then(Action::RemoveFile(installers_dir.join("tmpicns.rsrc")))
        .optional();
}
