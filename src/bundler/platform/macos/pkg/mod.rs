//! macOS component packages and product archive.
//!
//! Each JUCE plugin format gets its own component package built with
//! `pkgbuild`; `productbuild` then combines them under a distribution file
//! that lets the user pick formats in the installer's customize pane.
//!
//! # Module Organization
//!
//! - `template` - distribution XML and uninstall script templates
//! - `distribution` - distribution XML rendering
//! - `icon` - Finder icon stamping on the product archive
//! - `uninstall` - uninstall script rendering

mod distribution;
mod icon;
mod template;
mod uninstall;

use crate::bundler::plan::ToolCommand;
use std::path::Path;

pub use distribution::generate_distribution_xml;
pub use icon::add_steps as add_icon_steps;
pub use uninstall::generate_uninstall_script;

/// Plugin formats shipped in the macOS installer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PluginFormat {
    /// Standalone application bundle
    Standalone,
    /// VST3 plug-in bundle
    Vst3,
    /// Audio Unit (v2) component
    Au,
}

impl PluginFormat {
    /// Order in which component packages are built.
    pub const BUILD_ORDER: [Self; 3] = [Self::Standalone, Self::Vst3, Self::Au];

    /// Order of the choices presented by the installer.
    pub const CHOICE_ORDER: [Self; 3] = [Self::Vst3, Self::Au, Self::Standalone];

    /// Name used in progress messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Standalone => "Standalone",
            Self::Vst3 => "VST3",
            Self::Au => "AU",
        }
    }

    /// Component package file suffix (`<name>_<SUFFIX>.pkg`).
    pub fn package_suffix(self) -> &'static str {
        match self {
            Self::Standalone => "APP",
            Self::Vst3 => "VST3",
            Self::Au => "AU",
        }
    }

    /// Segment of the package identifier.
    fn identifier_segment(self) -> &'static str {
        match self {
            Self::Standalone => "app",
            Self::Vst3 => "vst3",
            Self::Au => "au",
        }
    }

    /// Subdirectory of `<artefacts>/Release` holding the built bundle.
    pub fn artefact_dir(self) -> &'static str {
        match self {
            Self::Standalone => "Standalone",
            Self::Vst3 => "VST3",
            Self::Au => "AU",
        }
    }

    /// System directory the bundle is installed into.
    pub fn install_location(self) -> &'static str {
        match self {
            Self::Standalone => "/Applications",
            Self::Vst3 => "/Library/Audio/Plug-Ins/VST",
            Self::Au => "/Library/Audio/Plug-Ins/Components",
        }
    }

    /// Bundle extension of the installed product.
    pub fn bundle_extension(self) -> &'static str {
        match self {
            Self::Standalone => "app",
            Self::Vst3 => "vst3",
            Self::Au => "component",
        }
    }

    /// Choice title shown by the installer.
    pub fn choice_title(self) -> &'static str {
        match self {
            Self::Standalone => "Standalone App",
            Self::Vst3 => "VST3 Plug-in",
            Self::Au => "Audio Unit (v2) Plug-in",
        }
    }

    /// Package identifier: `<prefix>.<app|vst3|au>.pkg.<name>`.
    pub fn identifier(self, prefix: &str, name: &str) -> String {
        format!("{}.{}.pkg.{}", prefix, self.identifier_segment(), name)
    }

    /// Component package file name.
    pub fn package_file_name(self, name: &str) -> String {
        format!("{}_{}.pkg", name, self.package_suffix())
    }
}

/// Arguments of one `pkgbuild` invocation.
pub struct ComponentPackage<'a> {
    /// Plugin format
    pub format: PluginFormat,
    /// `<artefacts>/Release`
    pub release_dir: &'a Path,
    /// Output directory for component packages
    pub pkg_dir: &'a Path,
    /// Identifier prefix
    pub prefix: &'a str,
    /// Installer name
    pub name: &'a str,
    /// Package version
    pub version: &'a str,
}

impl ComponentPackage<'_> {
    /// `pkgbuild --root ... --identifier ... --version ... --install-location ... <out>`
    pub fn command(&self) -> ToolCommand {
        ToolCommand::new("pkgbuild")
            .arg("--root")
            .arg_path(&self.release_dir.join(self.format.artefact_dir()))
            .arg("--identifier")
            .arg(self.format.identifier(self.prefix, self.name))
            .arg("--version")
            .arg(self.version)
            .arg("--install-location")
            .arg(self.format.install_location())
            .arg_path(&self.pkg_dir.join(self.format.package_file_name(self.name)))
    }
}
