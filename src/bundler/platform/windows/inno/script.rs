//! Inno Setup script generation.
//!
//! Renders the ISS template with handlebars. Escaping is disabled: the
//! output is an INI-like script, not HTML.

use super::template::ISS_TEMPLATE;
use crate::bundler::{
    error::Result,
    settings::{InstallerPlatform, Settings},
};
use handlebars::Handlebars;
use std::collections::BTreeMap;

/// Publisher used when `CMakeLists.txt` has no `COMPANY_NAME`.
pub const UNKNOWN_PUBLISHER: &str = "Unknown Publisher";

/// Generate the Inno Setup script for the current project.
///
/// Output binaries are read from the JUCE artefacts directory, wizard images
/// and license from the resources directory.
pub fn generate_iss_script(settings: &Settings) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.register_template_string("installer.iss", ISS_TEMPLATE)?;

    let project = settings.project()?;
    let product = project.product_name.as_str();
    let release = settings.artefacts_dir()?.join("Release");
    let resources = settings.resources_dir();
    let output_dir = settings.installers_dir(InstallerPlatform::Windows);

    let mut data = BTreeMap::new();
    data.insert("product_name", product.to_string());
    data.insert(
        "publisher",
        project
            .company_name
            .as_deref()
            .unwrap_or(UNKNOWN_PUBLISHER)
            .to_string(),
    );
    data.insert("installer_name", settings.installer_name()?);
    data.insert("version", project.version.clone());

    // Inno Setup reads `{{` as a literal brace
    data.insert(
        "app_id",
        format!("{{{{{}}}", settings.bundle_settings().windows.app_id),
    );

    data.insert("default_dir", format!("{{autopf64}}\\{}", product));
    data.insert("output_dir", output_dir.display().to_string());
    data.insert("small_image", resources.join("icon.bmp").display().to_string());
    data.insert("wizard_image", resources.join("banner.bmp").display().to_string());
    data.insert("license_file", resources.join("license.rtf").display().to_string());

    data.insert(
        "standalone_source",
        release
            .join("Standalone")
            .join(format!("{}.exe", product))
            .display()
            .to_string(),
    );
    data.insert(
        "vst3_source",
        release
            .join("VST3")
            .join(format!("{}.vst3", product))
            .join("Contents")
            .join("x86_64-win")
            .join(format!("{}.vst3", product))
            .display()
            .to_string(),
    );

    data.insert("program_icon", format!("{{group}}\\{}", product));
    data.insert("program_exe", format!("{{app}}\\{}.exe", product));
    data.insert("uninstall_icon", format!("{{group}}\\Uninstall {}", product));

    let iss = handlebars.render("installer.iss", &data)?;
    Ok(iss)
}
