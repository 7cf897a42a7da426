//! Portable Inno Setup acquisition.
//!
//! The compiler is kept next to the installers in `isp/` and fetched once
//! from the portapps release archive.

use crate::bundler::{
    plan::{Action, Plan, ToolCommand},
    settings::Settings,
};
use std::path::{Path, PathBuf};

/// Directory of the portable toolset: `<Installers/windows>/isp`.
pub fn toolset_dir(installers_dir: &Path) -> PathBuf {
    installers_dir.join("isp")
}

/// Path of the Inno Setup command line compiler inside the toolset.
pub fn iscc_path(installers_dir: &Path) -> PathBuf {
    toolset_dir(installers_dir).join("app").join("ISCC.exe")
}

/// Adds download and unpack steps when the toolset directory is missing.
///
/// The archive is 7z, which the Windows `tar` (bsdtar) unpacks natively.
pub(super) fn add_steps(plan: &mut Plan, settings: &Settings, installers_dir: &Path) {
    let isp = toolset_dir(installers_dir);
    if isp.exists() {
        log::debug!("Inno Setup found at {}", isp.display());
        return;
    }

    let archive = isp.join("isp.7z");
    plan.step(
        "Downloading Inno Setup portable...",
        Action::CreateDir(isp.clone()),
    );
    plan.then(Action::Download {
        url: settings.bundle_settings().windows.inno_setup_url.clone(),
        dest: archive.clone(),
    });
    plan.then(Action::Run(
        ToolCommand::new("tar")
            .arg("-xf")
            .arg_path(&archive)
            .arg("-C")
            .arg_path(&isp),
    ));
    plan.then(Action::RemoveFile(archive));
}
