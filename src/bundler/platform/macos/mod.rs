//! macOS installers.
//!
//! - `pkg` - component packages, distribution XML, icon, uninstall script
//! - `dmg` - disk image wrapping the product archive via `create-dmg`

pub mod dmg;
pub mod pkg;

use crate::bundler::{
    error::Result,
    plan::{Action, FileEncoding, Plan, ToolCommand},
    settings::{InstallerPlatform, Settings},
};
use pkg::{ComponentPackage, PluginFormat};

/// Flags of the `macos` subcommand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MacOsOptions {
    /// Empty `<artefacts>/Release` once the installer is built.
    pub clear: bool,
    /// Wrap the installer in a DMG.
    pub archive: bool,
    /// Only write the uninstall script.
    pub uninstall: bool,
}

/// Plans the macOS installer.
///
/// # Process
///
/// 1. Build one component package per plugin format
/// 2. Write `distribution.xml` and combine the packages with `productbuild`
/// 3. Stamp the product icon on `<name>-setup.pkg`
/// 4. Optionally clear the Release artefacts
/// 5. Optionally build `<name>-v<version>-mac.dmg`
///
/// With [`MacOsOptions::uninstall`] only the uninstall script is written.
pub fn plan(settings: &Settings, options: &MacOsOptions) -> Result<Plan> {
    let project = settings.project()?;
    let name = settings.installer_name()?;
    let inst = settings.installers_dir(InstallerPlatform::MacOs);
    log::info!("Planning macOS installer {} {}", name, project.version);

    let mut plan = Plan::new(format!("{} {}", project.project_name, project.version));

    if options.uninstall {
        add_uninstall_steps(&mut plan, settings)?;
        return Ok(plan);
    }

    let pkg_dir = inst.join("pkg");
    if !pkg_dir.exists() {
        plan.step(
            format!("Creating {}...", pkg_dir.display()),
            Action::CreateDir(pkg_dir.clone()),
        );
    }

    let release_dir = settings.artefacts_dir()?.join("Release");
    let prefix = &settings.bundle_settings().identifier_prefix;
    for format in PluginFormat::BUILD_ORDER {
        let package = ComponentPackage {
            format,
            release_dir: &release_dir,
            pkg_dir: &pkg_dir,
            prefix,
            name: &name,
            version: &project.version,
        };
        plan.step(
            format!("Creating {} PKG...", format.display_name()),
            Action::Run(package.command()),
        );
    }

    let distribution = inst.join("distribution.xml");
    plan.step(
        format!("Writing xml to {}...", distribution.display()),
        Action::WriteFile {
            path: distribution.clone(),
            label: "XML CONFIG".into(),
            contents: pkg::generate_distribution_xml(settings)?,
            encoding: FileEncoding::Utf8,
            executable: false,
        },
    );

    let setup_pkg = format!("{}-setup.pkg", name);
    plan.step(
        "Building product archive...",
        Action::Run(
            ToolCommand::new("productbuild")
                .arg("--resources")
                .arg_path(&inst)
                .arg("--distribution")
                .arg_path(&distribution)
                .arg("--package-path")
                .arg_path(&pkg_dir)
                .arg_path(&inst.join(&setup_pkg)),
        ),
    );

    pkg::add_icon_steps(&mut plan, settings, &inst, &setup_pkg);

    if options.clear {
        plan.step(
            format!("Clearing {}...", release_dir.display()),
            Action::ClearDir(release_dir.clone()),
        );
    }

    if options.archive {
        dmg::add_steps(&mut plan, settings, &inst, &setup_pkg)?;
    }

    Ok(plan)
}

/// Writes `<Installers/macos>/mac_uninstall`, creating the directory first.
fn add_uninstall_steps(plan: &mut Plan, settings: &Settings) -> Result<()> {
    let inst = settings.installers_dir(InstallerPlatform::MacOs);
    if !inst.exists() {
        plan.step(
            format!("Creating {}...", inst.display()),
            Action::CreateDir(inst.clone()),
        );
    }

    let path = inst.join("mac_uninstall");
    plan.step(
        format!("Exporting uninstall script as {}...", path.display()),
        Action::WriteFile {
            path,
            label: "UNINSTALL SCRIPT".into(),
            contents: pkg::generate_uninstall_script(settings)?,
            encoding: FileEncoding::Utf8,
            executable: true,
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;
    use crate::metadata::ProjectMetadata;
    use std::path::Path;

    fn settings(repo: &Path) -> Settings {
        SettingsBuilder::new()
            .repo_dir(repo)
            .project(ProjectMetadata {
                project_name: "NeuralAmpModeler".into(),
                version: "0.2.1".into(),
                product_name: "Neural Amp Modeler".into(),
                company_name: None,
            })
            .build()
            .unwrap()
    }

    fn programs(plan: &Plan) -> Vec<String> {
        plan.commands()
            .map(|c| c.program().display().to_string())
            .collect()
    }

    #[test]
    fn default_plan_without_icon() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let plan = plan(&settings, &MacOsOptions::default()).unwrap();
        let inst = settings.installers_dir(InstallerPlatform::MacOs);

        assert_eq!(plan.title(), "NeuralAmpModeler 0.2.1");
        assert_eq!(plan.steps()[0].action(), &Action::CreateDir(inst.join("pkg")));
        assert_eq!(
            programs(&plan),
            ["pkgbuild", "pkgbuild", "pkgbuild", "productbuild"]
        );
        assert_eq!(plan.steps()[1].description(), Some("Creating Standalone PKG..."));
        assert_eq!(plan.steps()[3].description(), Some("Creating AU PKG..."));

        let build = plan.commands().last().unwrap();
        assert_eq!(
            build.get_args().last().unwrap(),
            &inst.join("NeuralAmpModeler-setup.pkg").display().to_string()
        );

        // icon missing in a bare repo
        assert_eq!(plan.warnings().len(), 1);
    }

    #[test]
    fn distribution_is_written_before_productbuild() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan(&settings(dir.path()), &MacOsOptions::default()).unwrap();

        let steps = plan.steps();
        let xml = steps
            .iter()
            .position(|s| {
                matches!(s.action(), Action::WriteFile { label, .. } if label == "XML CONFIG")
            })
            .unwrap();
        let product = steps
            .iter()
            .position(|s| {
                s.command()
                    .is_some_and(|c| c.program() == Path::new("productbuild"))
            })
            .unwrap();
        assert!(xml < product);
    }

    #[test]
    fn icon_steps_follow_productbuild() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Assets")).unwrap();
        std::fs::write(dir.path().join("Assets").join("ICON.png"), b"png").unwrap();

        let plan = plan(&settings(dir.path()), &MacOsOptions::default()).unwrap();

        assert!(plan.warnings().is_empty());
        assert_eq!(
            programs(&plan)[4..],
            ["sips", "Rez", "SetFile"].map(String::from)
        );
        assert_eq!(
            plan.required_tools().into_iter().collect::<Vec<_>>(),
            vec!["pkgbuild", "productbuild"]
        );
    }

    #[test]
    fn clear_and_archive_append_steps() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let plan = plan(
            &settings,
            &MacOsOptions {
                clear: true,
                archive: true,
                uninstall: false,
            },
        )
        .unwrap();

        let release = settings.artefacts_dir().unwrap().join("Release");
        let clear = plan
            .steps()
            .iter()
            .position(|s| s.action() == &Action::ClearDir(release.clone()))
            .unwrap();
        let dmg = plan
            .steps()
            .iter()
            .position(|s| s.command().is_some_and(|c| c.program() == Path::new("sh")))
            .unwrap();
        assert!(clear < dmg);
        assert!(programs(&plan).contains(&"git".to_string()));
    }

    #[test]
    fn uninstall_only_writes_script() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let plan = plan(
            &settings,
            &MacOsOptions {
                uninstall: true,
                ..Default::default()
            },
        )
        .unwrap();

        let inst = settings.installers_dir(InstallerPlatform::MacOs);
        assert_eq!(plan.steps().len(), 2);
        assert_eq!(plan.steps()[0].action(), &Action::CreateDir(inst.clone()));
        match plan.steps()[1].action() {
            Action::WriteFile {
                path,
                label,
                executable,
                contents,
                ..
            } => {
                assert_eq!(path, &inst.join("mac_uninstall"));
                assert_eq!(label, "UNINSTALL SCRIPT");
                assert!(*executable);
                assert!(contents.starts_with("#!/bin/bash\n"));
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(plan.commands().count(), 0);
    }
}
