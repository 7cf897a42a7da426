//! Distribution XML generation for `productbuild`.

use super::{PluginFormat, template::DISTRIBUTION_TEMPLATE};
use crate::bundler::{error::Result, settings::Settings};
use handlebars::Handlebars;
use serde::Serialize;

#[derive(Serialize)]
struct PackageRef {
    id: String,
    title: &'static str,
    version: String,
    file: String,
}

#[derive(Serialize)]
struct DistributionData {
    name: String,
    version: String,
    license: String,
    host_architectures: String,
    packages: Vec<PackageRef>,
}

/// Escapes text for XML attribute and element content.
fn xml_escape(data: &str) -> String {
    let mut escaped = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Generate the distribution XML combining the three component packages.
///
/// Choices are listed VST3, AU, then Standalone, all selected by default.
pub fn generate_distribution_xml(settings: &Settings) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(xml_escape);
    handlebars.register_template_string("distribution.xml", DISTRIBUTION_TEMPLATE)?;

    let project = settings.project()?;
    let name = settings.installer_name()?;
    let bundle = settings.bundle_settings();

    let packages = PluginFormat::CHOICE_ORDER
        .iter()
        .map(|format| PackageRef {
            id: format.identifier(&bundle.identifier_prefix, &name),
            title: format.choice_title(),
            version: project.version.clone(),
            file: format.package_file_name(&name),
        })
        .collect();

    let data = DistributionData {
        license: settings
            .resources_dir()
            .join("license.rtf")
            .display()
            .to_string(),
        version: project.version.clone(),
        host_architectures: bundle.macos.host_architectures.join(","),
        packages,
        name,
    };

    let xml = handlebars.render("distribution.xml", &data)?;
    Ok(xml)
}
