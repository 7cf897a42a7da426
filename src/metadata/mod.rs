//! Project metadata discovery from the plugin's CMakeLists.txt

use crate::bundler::{Error, ErrorExt, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"set\(\s*PROJECT_NAME\s+"([^"]*)"\s*\)"#).expect("valid regex"));

static PLUGIN_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"set\(\s*PLUGIN_VERSION\s+"?([^")\s]*)"?\s*\)"#).expect("valid regex")
});

static PRODUCT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"PRODUCT_NAME\s+"([^"]*)""#).expect("valid regex"));

static COMPANY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"COMPANY_NAME\s+"([^"]*)""#).expect("valid regex"));

/// Plugin metadata extracted from CMakeLists.txt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    /// CMake project name (`set(PROJECT_NAME "...")`), also names the artefacts directory
    pub project_name: String,

    /// Plugin version (`set(PLUGIN_VERSION ...)`)
    pub version: String,

    /// Human-readable product name (`PRODUCT_NAME "..."`)
    pub product_name: String,

    /// Publisher (`COMPANY_NAME "..."`), only needed by the Windows installer
    pub company_name: Option<String>,
}

/// Read and parse `<repo>/CMakeLists.txt`.
pub fn load_project_metadata(repo_dir: &Path) -> Result<ProjectMetadata> {
    let path = repo_dir.join("CMakeLists.txt");
    let text = std::fs::read_to_string(&path).fs_context("reading", &path)?;
    parse_cmake_lists(&text, &path)
}

/// Extract project fields from CMakeLists.txt contents.
///
/// `path` is only used for error messages.
pub fn parse_cmake_lists(text: &str, path: &Path) -> Result<ProjectMetadata> {
    let required = |field: &'static str, pattern: &Regex| {
        find_field(text, pattern).ok_or_else(|| Error::MissingField {
            field,
            path: path.to_path_buf(),
        })
    };

    let metadata = ProjectMetadata {
        project_name: required("PROJECT_NAME", &PROJECT_NAME)?,
        version: required("PLUGIN_VERSION", &PLUGIN_VERSION)?,
        product_name: required("PRODUCT_NAME", &PRODUCT_NAME)?,
        company_name: find_field(text, &COMPANY_NAME),
    };

    log::debug!(
        "Parsed {}: {} {} ({})",
        path.display(),
        metadata.project_name,
        metadata.version,
        metadata.product_name
    );

    Ok(metadata)
}

/// First non-empty capture on a non-comment line.
fn find_field(text: &str, pattern: &Regex) -> Option<String> {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(|line| pattern.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CMAKE_LISTS: &str = r#"
cmake_minimum_required(VERSION 3.15)

set(PROJECT_NAME "NeuralAmpModeler")
set(PLUGIN_VERSION 0.2.1)

project(${PROJECT_NAME} VERSION ${PLUGIN_VERSION})

# PRODUCT_NAME "Commented Out"
juce_add_plugin(${PROJECT_NAME}
    COMPANY_NAME "Manos Labrakis"
    IS_SYNTH FALSE
    PLUGIN_MANUFACTURER_CODE Mlab
    FORMATS AU VST3 Standalone
    PRODUCT_NAME "Neural Amp Modeler")
"#;

    fn parse(text: &str) -> Result<ProjectMetadata> {
        parse_cmake_lists(text, Path::new("CMakeLists.txt"))
    }

    #[test]
    fn extracts_all_fields() {
        let meta = parse(CMAKE_LISTS).unwrap();
        assert_eq!(meta.project_name, "NeuralAmpModeler");
        assert_eq!(meta.version, "0.2.1");
        assert_eq!(meta.product_name, "Neural Amp Modeler");
        assert_eq!(meta.company_name.as_deref(), Some("Manos Labrakis"));
    }

    #[test]
    fn quoted_version_is_accepted() {
        let text = CMAKE_LISTS.replace("set(PLUGIN_VERSION 0.2.1)", "set(PLUGIN_VERSION \"1.0.0\")");
        assert_eq!(parse(&text).unwrap().version, "1.0.0");
    }

    #[test]
    fn company_name_is_optional() {
        let text = CMAKE_LISTS.replace("COMPANY_NAME \"Manos Labrakis\"", "");
        assert_eq!(parse(&text).unwrap().company_name, None);
    }

    #[test]
    fn missing_project_name_is_reported() {
        let text = CMAKE_LISTS.replace("set(PROJECT_NAME \"NeuralAmpModeler\")", "");
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "PROJECT_NAME", .. }));
    }

    #[test]
    fn empty_product_name_is_missing() {
        let text = CMAKE_LISTS.replace("PRODUCT_NAME \"Neural Amp Modeler\"", "PRODUCT_NAME \"  \"");
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "PRODUCT_NAME", .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_project_metadata(dir.path()).unwrap_err();
        assert!(err.to_string().contains("CMakeLists.txt"));
    }
}
