//! CMake configure and build invocations.

use super::{AsioOptions, sdk};
use crate::bundler::{plan::ToolCommand, settings::Settings};

/// `cmake -S <repo> -B <repo>/build [...] -DASIO_PATH=<sdk>/common`
pub(super) fn configure(settings: &Settings, options: &AsioOptions) -> ToolCommand {
    let repo = settings.repo_dir();
    let mut command = ToolCommand::new("cmake")
        .arg("-S")
        .arg_path(repo)
        .arg("-B")
        .arg_path(&repo.join("build"));

    if let Some(prefix) = &options.prefix {
        command = command.arg(format!("-DCMAKE_PREFIX_PATH={}", prefix.display()));
    }
    if options.native {
        command = command.arg("-DUSE_NATIVE_ARCH=1");
    }

    command.arg(format!(
        "-DASIO_PATH={}",
        sdk::asio_common_dir(settings).display()
    ))
}

/// `cmake --build <repo>/build --config Release -j <jobs>`
pub(super) fn build(settings: &Settings, jobs: usize) -> ToolCommand {
    ToolCommand::new("cmake")
        .arg("--build")
        .arg_path(&settings.repo_dir().join("build"))
        .args(["--config", "Release", "-j"])
        .arg(jobs.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;
    use std::path::PathBuf;

    fn settings() -> Settings {
        SettingsBuilder::new()
            .repo_dir(std::env::temp_dir().join("plugin"))
            .build()
            .unwrap()
    }

    #[test]
    fn configure_without_flags() {
        let settings = settings();
        let cmd = configure(&settings, &AsioOptions::default());
        let repo = settings.repo_dir();
        let args = cmd.get_args();

        assert_eq!(args[0], "-S");
        assert_eq!(args[1], repo.to_string_lossy());
        assert_eq!(args[3], repo.join("build").to_string_lossy());
        assert_eq!(args.len(), 5);
        assert!(args[4].starts_with("-DASIO_PATH="));
        assert!(args[4].ends_with(
            &PathBuf::from("asiosdk_2.3.3_2019-06-14")
                .join("common")
                .display()
                .to_string()
        ));
    }

    #[test]
    fn prefix_precedes_native_flag() {
        let cmd = configure(
            &settings(),
            &AsioOptions {
                native: true,
                prefix: Some(PathBuf::from("C:/JUCE")),
            },
        );
        let args = cmd.get_args();
        assert_eq!(args[4], "-DCMAKE_PREFIX_PATH=C:/JUCE");
        assert_eq!(args[5], "-DUSE_NATIVE_ARCH=1");
        assert!(args[6].starts_with("-DASIO_PATH="));
    }

    #[test]
    fn native_only() {
        let cmd = configure(
            &settings(),
            &AsioOptions {
                native: true,
                prefix: None,
            },
        );
        assert_eq!(cmd.get_args()[4], "-DUSE_NATIVE_ARCH=1");
        assert!(!cmd.get_args().iter().any(|a| a.contains("CMAKE_PREFIX_PATH")));
    }

    #[test]
    fn build_uses_release_and_job_count() {
        let settings = settings();
        let cmd = build(&settings, 12);
        assert_eq!(cmd.program(), std::path::Path::new("cmake"));
        assert_eq!(
            cmd.get_args()[2..],
            ["--config", "Release", "-j", "12"].map(String::from)
        );
    }
}
