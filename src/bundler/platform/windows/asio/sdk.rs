//! ASIO SDK location and acquisition.

use crate::bundler::{
    plan::{Action, Plan},
    settings::Settings,
};
use std::path::PathBuf;

/// Directory holding downloaded SDKs: `<repo>/sdk`.
pub fn sdk_root(settings: &Settings) -> PathBuf {
    settings.repo_dir().join("sdk")
}

/// The SDK's `common` directory, passed to CMake as `ASIO_PATH`.
pub fn asio_common_dir(settings: &Settings) -> PathBuf {
    sdk_root(settings)
        .join(&settings.bundle_settings().asio.sdk_dir_name)
        .join("common")
}

/// Adds the steps that create `<repo>/sdk` and fetch the SDK when missing.
pub(super) fn add_steps(plan: &mut Plan, settings: &Settings) {
    let asio = &settings.bundle_settings().asio;
    let root = sdk_root(settings);

    if !root.exists() {
        plan.step(
            format!("Creating {}...", root.display()),
            Action::CreateDir(root.clone()),
        );
    }

    let sdk_dir = root.join(&asio.sdk_dir_name);
    if sdk_dir.exists() {
        log::debug!("ASIO SDK already present at {}", sdk_dir.display());
        return;
    }

    let archive = root.join("asio.zip");
    plan.step(
        "Downloading ASIO SDK...",
        Action::Download {
            url: asio.sdk_url.clone(),
            dest: archive.clone(),
        },
    );
    plan.then(Action::ExtractZip {
        archive: archive.clone(),
        dest: root,
    });
    plan.then(Action::RemoveFile(archive));
}
