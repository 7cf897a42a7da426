//! Build the plugin with ASIO support.
//!
//! Makes sure the Steinberg ASIO SDK is unpacked under `<repo>/sdk`, then
//! configures and builds the project with CMake in Release mode.
//!
//! # Module Organization
//!
//! - `sdk` - SDK location and download steps
//! - `cmake` - configure and build invocations

mod cmake;
mod sdk;

use crate::bundler::{
    error::Result,
    plan::{Action, Plan},
    settings::Settings,
};
use std::path::PathBuf;

pub use sdk::{asio_common_dir, sdk_root};

/// Flags of the `build-asio` subcommand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AsioOptions {
    /// Pass `-DUSE_NATIVE_ARCH=1` to enable host CPU optimisations.
    pub native: bool,
    /// Prebuilt JUCE location passed as `CMAKE_PREFIX_PATH`.
    pub prefix: Option<PathBuf>,
}

/// Plans the ASIO build.
///
/// # Process
///
/// 1. Create `<repo>/sdk` if missing
/// 2. Download and unpack the SDK if its directory is missing
/// 3. Configure with CMake (`-DASIO_PATH` pointing at the SDK's `common` dir)
/// 4. Build the Release configuration using every logical CPU
pub fn plan(settings: &Settings, options: &AsioOptions) -> Result<Plan> {
    log::info!(
        "Planning ASIO build for {}",
        settings.repo_dir().display()
    );

    let mut plan = Plan::new("Building with ASIO");
    sdk::add_steps(&mut plan, settings);

    let jobs = num_cpus::get();
    plan.step(
        "Building project...",
        Action::Run(cmake::configure(settings, options)),
    );
    plan.then(Action::Run(cmake::build(settings, jobs)));

    Ok(plan)
}
