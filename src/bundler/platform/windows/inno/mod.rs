//! Windows Inno Setup installer creation.
//!
//! Generates an Inno Setup script for the Standalone and VST3 builds,
//! compiles it with a portable `ISCC.exe` and optionally zips the result.
//!
//! # Module Organization
//!
//! - `template` - ISS script template constant
//! - `script` - ISS script generation from the template
//! - `toolset` - portable Inno Setup download and location

mod script;
mod template;
mod toolset;

use crate::bundler::{
    error::Result,
    plan::{Action, FileEncoding, Plan, ToolCommand},
    settings::{InstallerPlatform, Settings},
};

pub use script::{UNKNOWN_PUBLISHER, generate_iss_script};
pub use toolset::{iscc_path, toolset_dir};

/// Flags of the `windows` subcommand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowsOptions {
    /// Zip the compiled installer.
    pub archive: bool,
}

/// Plans the Windows installer.
///
/// # Process
///
/// 1. Create `<repo>/Installers/windows` if missing
/// 2. Write `<name>.iss` (UTF-8 with BOM)
/// 3. Fetch portable Inno Setup if `isp/` is missing
/// 4. Compile with `ISCC.exe`, producing `<name>-setup.exe`
/// 5. Optionally store the installer in `<name>-v<version>-win.zip`
pub fn plan(settings: &Settings, options: &WindowsOptions) -> Result<Plan> {
    let project = settings.project()?;
    let name = settings.installer_name()?;
    let win_dir = settings.installers_dir(InstallerPlatform::Windows);
    log::info!("Planning Windows installer {} {}", name, project.version);

    let mut plan = Plan::new(format!("{} {}", project.project_name, project.version));

    if project.company_name.is_none() {
        plan.warn(format!(
            "COMPANY_NAME not set in CMakeLists.txt, using \"{}\"",
            UNKNOWN_PUBLISHER
        ));
    }

    if !win_dir.exists() {
        plan.step(
            format!("Creating {}...", win_dir.display()),
            Action::CreateDir(win_dir.clone()),
        );
    }

    let iss_path = win_dir.join(format!("{}.iss", name));
    plan.step(
        format!("Writing iss script to {}...", iss_path.display()),
        Action::WriteFile {
            path: iss_path.clone(),
            label: "ISS SCRIPT".into(),
            contents: generate_iss_script(settings)?,
            encoding: FileEncoding::Utf8Bom,
            executable: false,
        },
    );

    toolset::add_steps(&mut plan, settings, &win_dir);

    plan.step(
        "Compiling installer...",
        Action::Run(ToolCommand::new(iscc_path(&win_dir)).arg_path(&iss_path)),
    );

    if options.archive {
        let archive = win_dir.join(format!("{}-v{}-win.zip", name, project.version));
        plan.step(
            format!("Archiving as {}...", archive.display()),
            Action::CompressZip {
                source: win_dir.join(format!("{}-setup.exe", name)),
                dest: archive,
            },
        );
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;
    use crate::metadata::ProjectMetadata;
    use std::path::Path;

    fn settings(repo: &Path, company: Option<&str>) -> Settings {
        SettingsBuilder::new()
            .repo_dir(repo)
            .project(ProjectMetadata {
                project_name: "NeuralAmpModeler".into(),
                version: "0.2.1".into(),
                product_name: "Neural Amp Modeler".into(),
                company_name: company.map(String::from),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn fresh_repo_plan() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Some("Manos Labrakis"));
        let plan = plan(&settings, &WindowsOptions::default()).unwrap();
        let win = settings.installers_dir(InstallerPlatform::Windows);

        assert_eq!(plan.title(), "NeuralAmpModeler 0.2.1");
        assert!(plan.warnings().is_empty());

        let steps = plan.steps();
        assert_eq!(steps[0].action(), &Action::CreateDir(win.clone()));
        match steps[1].action() {
            Action::WriteFile {
                path,
                label,
                encoding,
                ..
            } => {
                assert_eq!(path, &win.join("NeuralAmpModeler.iss"));
                assert_eq!(label, "ISS SCRIPT");
                assert_eq!(*encoding, FileEncoding::Utf8Bom);
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(steps[2].action(), &Action::CreateDir(win.join("isp")));
        assert!(matches!(steps[3].action(), Action::Download { dest, .. }
            if *dest == win.join("isp").join("isp.7z")));
        assert_eq!(steps[4].command().unwrap().program(), Path::new("tar"));
        assert_eq!(steps[5].action(), &Action::RemoveFile(win.join("isp").join("isp.7z")));

        let iscc = steps[6].command().unwrap();
        assert_eq!(iscc.program(), iscc_path(&win));
        assert_eq!(iscc.get_args(), [win.join("NeuralAmpModeler.iss").display().to_string()]);
        assert_eq!(steps.len(), 7);
    }

    #[test]
    fn existing_toolset_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Some("Manos Labrakis"));
        let win = settings.installers_dir(InstallerPlatform::Windows);
        std::fs::create_dir_all(win.join("isp")).unwrap();

        let plan = plan(&settings, &WindowsOptions::default()).unwrap();

        assert_eq!(plan.steps().len(), 2);
        assert!(plan.required_tools().is_empty());
    }

    #[test]
    fn archive_zips_setup_executable() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Some("Manos Labrakis"));
        let win = settings.installers_dir(InstallerPlatform::Windows);
        std::fs::create_dir_all(win.join("isp")).unwrap();

        let plan = plan(&settings, &WindowsOptions { archive: true }).unwrap();

        assert_eq!(
            plan.steps().last().unwrap().action(),
            &Action::CompressZip {
                source: win.join("NeuralAmpModeler-setup.exe"),
                dest: win.join("NeuralAmpModeler-v0.2.1-win.zip"),
            }
        );
    }

    #[test]
    fn missing_company_warns() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan(&settings(dir.path(), None), &WindowsOptions::default()).unwrap();
        assert_eq!(plan.warnings().len(), 1);
        assert!(plan.warnings()[0].contains("Unknown Publisher"));
    }
}
