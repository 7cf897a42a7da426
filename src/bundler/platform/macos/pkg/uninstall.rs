//! Uninstall script generation.

use super::{PluginFormat, template::UNINSTALL_TEMPLATE};
use crate::bundler::{error::Result, settings::Settings};
use handlebars::Handlebars;
use serde::Serialize;

#[derive(Serialize)]
struct UninstallData<'a> {
    product_name: &'a str,
    app_bundle: String,
    vst3_bundle: String,
    au_bundle: String,
    app_id: String,
    vst3_id: String,
    au_id: String,
}

/// Installed location of a format's bundle, shell-escaped.
fn bundle_path(format: PluginFormat, escaped_product: &str) -> String {
    format!(
        "{}/{}.{}",
        format.install_location(),
        escaped_product,
        format.bundle_extension()
    )
}

/// Generate a bash script that removes the installed bundles and forgets the
/// package receipts.
///
/// Bundle paths use the product name with spaces backslash-escaped; receipts
/// use the installer name the packages were built with.
pub fn generate_uninstall_script(settings: &Settings) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.register_template_string("mac_uninstall", UNINSTALL_TEMPLATE)?;

    let product = settings.product_name()?;
    let escaped = product.replace(' ', "\\ ");
    let name = settings.installer_name()?;
    let prefix = &settings.bundle_settings().identifier_prefix;

    let data = UninstallData {
        product_name: product,
        app_bundle: bundle_path(PluginFormat::Standalone, &escaped),
        vst3_bundle: bundle_path(PluginFormat::Vst3, &escaped),
        au_bundle: bundle_path(PluginFormat::Au, &escaped),
        app_id: PluginFormat::Standalone.identifier(prefix, &name),
        vst3_id: PluginFormat::Vst3.identifier(prefix, &name),
        au_id: PluginFormat::Au.identifier(prefix, &name),
    };

    let script = handlebars.render("mac_uninstall", &data)?;
    Ok(script)
}
