//! External tool detection and availability checking.
//!
//! Every bare program a plan runs is looked up on `PATH` before a live run
//! starts, so a missing `pkgbuild` or `cmake` fails fast instead of halfway
//! through packaging.

use crate::bundler::error::{Error, Result};

/// Installation hint shown when `tool` is missing.
fn install_hint(tool: &str) -> &'static str {
    match tool {
        "cmake" => "Install CMake from https://cmake.org/download/ and add it to PATH.",
        "git" => "Install Git (e.g. `xcode-select --install` on macOS).",
        "tar" => "tar ships with Windows 10 1803 and later; update Windows or install bsdtar.",
        "pkgbuild" | "productbuild" | "sips" | "Rez" | "SetFile" => {
            "Install the Xcode command line tools: `xcode-select --install`."
        }
        "sh" => "A POSIX shell is required to run create-dmg.",
        _ => "Install it and make sure it is on PATH.",
    }
}

/// Checks that every tool is on `PATH`.
///
/// Returns [`Error::ToolNotFound`] for the first missing tool.
pub fn ensure_tools<'a>(tools: impl IntoIterator<Item = &'a str>) -> Result<()> {
    for tool in tools {
        match which::which(tool) {
            Ok(path) => log::debug!("Found {} at: {}", tool, path.display()),
            Err(e) => {
                log::debug!("{} not found in PATH: {}", tool, e);
                return Err(Error::ToolNotFound {
                    tool: tool.to_string(),
                    hint: install_hint(tool).to_string(),
                });
            }
        }
    }
    Ok(())
}
