//! Plan execution and dry-run reporting.

use super::{Action, FileEncoding, Plan, ToolCommand};
use crate::bundler::{
    Error, Result,
    builder::tool_detection,
    utils::{archive, fs, http},
};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Sink for user-facing progress output.
///
/// Implemented by the CLI's output manager; tests use an in-memory recorder.
pub trait Reporter {
    /// Section header (plan title, final status).
    fn section(&self, title: &str) -> std::io::Result<()>;
    /// Progress message of a step.
    fn progress(&self, message: &str) -> std::io::Result<()>;
    /// Indented detail line (command lines, child process output).
    fn detail(&self, line: &str) -> std::io::Result<()>;
    /// Generated file contents shown during dry runs.
    fn block(&self, label: &str, contents: &str) -> std::io::Result<()>;
    /// Non-fatal problem.
    fn warn(&self, message: &str) -> std::io::Result<()>;
    /// Completion message.
    fn success(&self, message: &str) -> std::io::Result<()>;
}

/// Runs or reports a [`Plan`].
pub struct Executor<'a> {
    reporter: &'a dyn Reporter,
    dry_run: bool,
}

impl<'a> Executor<'a> {
    /// Creates an executor; with `dry_run` nothing is written or spawned.
    pub fn new(reporter: &'a dyn Reporter, dry_run: bool) -> Self {
        Self { reporter, dry_run }
    }

    /// Whether this executor only reports.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Executes every step in order.
    ///
    /// Live runs first check that all required tools are on `PATH`. A failing
    /// required step aborts the plan; a failing optional step is reported as a
    /// warning.
    pub async fn execute(&self, plan: &Plan) -> Result<()> {
        self.reporter.section(plan.title())?;
        for warning in plan.warnings() {
            self.reporter.warn(warning)?;
        }

        if !self.dry_run {
            tool_detection::ensure_tools(plan.required_tools())?;
        }

        for step in plan.steps() {
            if let Some(description) = step.description() {
                self.reporter.progress(description)?;
            }

            if self.dry_run {
                self.report(step.action())?;
                continue;
            }

            match self.perform(step.action()).await {
                Ok(()) => {}
                Err(e) if step.is_optional() => {
                    log::warn!("Optional step failed: {}", e);
                    self.reporter.warn(&format!("Skipped: {}", e))?;
                }
                Err(e) => return Err(e),
            }
        }

        self.reporter.success("Done!")?;
        Ok(())
    }

    /// Dry-run rendering of one action.
    fn report(&self, action: &Action) -> Result<()> {
        let r = self.reporter;
        match action {
            Action::CreateDir(path) => r.detail(&format!("mkdir -p {}", path.display()))?,
            Action::ClearDir(path) => r.detail(&format!("rm -rf {}/*", path.display()))?,
            Action::RemoveFile(path) => r.detail(&format!("rm {}", path.display()))?,
            Action::RemoveDir(path) => r.detail(&format!("rm -rf {}", path.display()))?,
            Action::CopyFile { from, to } => {
                r.detail(&format!("cp {} {}", from.display(), to.display()))?
            }
            Action::WriteFile {
                path,
                label,
                contents,
                ..
            } => {
                r.block(label, contents)?;
                r.detail(&format!("write {}", path.display()))?;
            }
            Action::Download { url, dest } => {
                r.detail(&format!("download {} -> {}", url, dest.display()))?
            }
            Action::ExtractZip { archive, dest } => {
                r.detail(&format!("unzip {} -> {}", archive.display(), dest.display()))?
            }
            Action::CompressZip { source, dest } => {
                r.detail(&format!("zip {} -> {}", source.display(), dest.display()))?
            }
            Action::Run(command) => r.detail(&command.to_string())?,
        }
        Ok(())
    }

    async fn perform(&self, action: &Action) -> Result<()> {
        match action {
            Action::CreateDir(path) => fs::create_dir_all(path).await,
            Action::ClearDir(path) => fs::clear_dir(path).await,
            Action::RemoveFile(path) => fs::remove_file(path).await,
            Action::RemoveDir(path) => fs::remove_dir_all(path).await,
            Action::CopyFile { from, to } => fs::copy_file(from, to).await,
            Action::WriteFile {
                path,
                contents,
                encoding,
                executable,
                ..
            } => {
                fs::write_text(path, contents, *encoding == FileEncoding::Utf8Bom).await?;
                if *executable {
                    fs::set_executable(path).await?;
                }
                log::info!("Wrote {}", path.display());
                Ok(())
            }
            Action::Download { url, dest } => http::download_to(url, dest).await,
            Action::ExtractZip { archive, dest } => archive::extract_zip(archive, dest).await,
            Action::CompressZip { source, dest } => archive::compress_file(source, dest).await,
            Action::Run(command) => self.run_tool(command).await,
        }
    }

    /// Spawns a tool, streaming its output through the reporter.
    async fn run_tool(&self, command: &ToolCommand) -> Result<()> {
        let rendered = command.to_string();
        log::debug!("Running: {}", rendered);
        self.reporter.detail(&rendered)?;

        let mut child = command
            .to_process()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: rendered.clone(),
                error,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        tokio::join!(
            async {
                if let Some(stdout) = stdout {
                    forward_output(stdout, self.reporter).await;
                }
            },
            async {
                if let Some(stderr) = stderr {
                    forward_output(stderr, self.reporter).await;
                }
            }
        );

        let status = child.wait().await.map_err(|error| Error::CommandFailed {
            command: rendered.clone(),
            error,
        })?;

        if !status.success() {
            return Err(Error::ToolFailed {
                command: rendered,
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Streams a child pipe line by line until EOF.
///
/// Tools on Windows print in the local code page, so lines are decoded
/// lossily. The pipe is drained even when the terminal write fails, otherwise
/// the child dies on its next write.
async fn forward_output<R>(pipe: R, reporter: &dyn Reporter)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if let Err(e) = reporter.detail(line.trim_end_matches(['\r', '\n'])) {
                    log::debug!("Failed to print tool output: {}", e);
                }
            }
            Err(e) => {
                log::debug!("Stopped reading tool output: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Collects reporter output in memory.
    #[derive(Default)]
    struct Recorder {
        lines: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn text(&self) -> String {
            self.lines.borrow().join("\n")
        }

        fn push(&self, line: String) -> std::io::Result<()> {
            self.lines.borrow_mut().push(line);
            Ok(())
        }
    }

    impl Reporter for Recorder {
        fn section(&self, title: &str) -> std::io::Result<()> {
            self.push(format!("# {title}"))
        }
        fn progress(&self, message: &str) -> std::io::Result<()> {
            self.push(message.to_string())
        }
        fn detail(&self, line: &str) -> std::io::Result<()> {
            self.push(format!("  {line}"))
        }
        fn block(&self, label: &str, contents: &str) -> std::io::Result<()> {
            self.push(format!("===== {label} =====\n{contents}\n===== END {label} ====="))
        }
        fn warn(&self, message: &str) -> std::io::Result<()> {
            self.push(format!("warning: {message}"))
        }
        fn success(&self, message: &str) -> std::io::Result<()> {
            self.push(message.to_string())
        }
    }

    fn file_plan(root: &std::path::Path) -> Plan {
        let out = root.join("out");
        let mut plan = Plan::new("files");
        plan.step("Creating out...", Action::CreateDir(out.clone()));
        plan.then(Action::WriteFile {
            path: out.join("mac_uninstall"),
            label: "UNINSTALL SCRIPT".into(),
            contents: "#!/bin/bash\necho bye\n".into(),
            encoding: FileEncoding::Utf8,
            executable: true,
        });
        plan.then(Action::WriteFile {
            path: out.join("setup.iss"),
            label: "ISS SCRIPT".into(),
            contents: "[Setup]\n".into(),
            encoding: FileEncoding::Utf8Bom,
            executable: false,
        });
        plan
    }

    #[tokio::test]
    async fn dry_run_leaves_filesystem_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = Recorder::default();
        let mut plan = file_plan(dir.path());
        plan.warn("icon missing");
        plan.then(Action::Run(ToolCommand::new("definitely-not-a-real-tool-xyz")));

        Executor::new(&recorder, true).execute(&plan).await.unwrap();

        assert!(!dir.path().join("out").exists());
        let text = recorder.text();
        assert!(text.contains("warning: icon missing"));
        assert!(text.contains("Creating out..."));
        assert!(text.contains("===== UNINSTALL SCRIPT ====="));
        assert!(text.contains("echo bye"));
        assert!(text.contains("definitely-not-a-real-tool-xyz"));
        assert!(text.ends_with("Done!"));
    }

    #[tokio::test]
    async fn live_run_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = Recorder::default();

        Executor::new(&recorder, false)
            .execute(&file_plan(dir.path()))
            .await
            .unwrap();

        let out = dir.path().join("out");
        let script = std::fs::read_to_string(out.join("mac_uninstall")).unwrap();
        assert_eq!(script, "#!/bin/bash\necho bye\n");
        let iss = std::fs::read(out.join("setup.iss")).unwrap();
        assert_eq!(&iss[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(&iss[3..], b"[Setup]\n");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(out.join("mac_uninstall"))
                .unwrap()
                .permissions()
                .mode();
            assert_ne!(mode & 0o111, 0);
        }
    }

    #[tokio::test]
    async fn missing_tool_aborts_before_any_step() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = Recorder::default();
        let mut plan = file_plan(dir.path());
        plan.then(Action::Run(ToolCommand::new("definitely-not-a-real-tool-xyz")));

        let err = Executor::new(&recorder, false)
            .execute(&plan)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ToolNotFound { .. }));
        assert!(!dir.path().join("out").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_required_tool_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let marker: PathBuf = dir.path().join("after");
        let recorder = Recorder::default();
        let mut plan = Plan::new("fail");
        plan.then(Action::Run(ToolCommand::new("sh").args(["-c", "echo oops; exit 3"])));
        plan.then(Action::CreateDir(marker.clone()));

        let err = Executor::new(&recorder, false)
            .execute(&plan)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ToolFailed { code: Some(3), .. }));
        assert!(!marker.exists());
        assert!(recorder.text().contains("oops"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_utf8_output_does_not_fail_the_tool() {
        let recorder = Recorder::default();
        let mut plan = Plan::new("iscc");
        plan.then(Action::Run(ToolCommand::new("sh").args([
            "-c",
            "printf 'Erstellung abgeschlossen \\374\\n'; sleep 0.2; \
             i=0; while [ $i -lt 20000 ]; do echo \"line $i\"; i=$((i+1)); done; exit 0",
        ])));

        Executor::new(&recorder, false).execute(&plan).await.unwrap();

        let text = recorder.text();
        assert!(text.contains("Erstellung abgeschlossen \u{FFFD}"));
        assert!(text.contains("line 19999"));
        assert!(text.ends_with("Done!"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_optional_tool_only_warns() {
        let dir = tempfile::tempdir().unwrap();
        let marker: PathBuf = dir.path().join("after");
        let recorder = Recorder::default();
        let mut plan = Plan::new("icon");
        plan.then(Action::Run(ToolCommand::new("sh").args(["-c", "exit 1"])))
            .optional();
        plan.then(Action::CreateDir(marker.clone()));

        Executor::new(&recorder, false).execute(&plan).await.unwrap();

        assert!(marker.exists());
        assert!(recorder.text().contains("warning: Skipped"));
    }

    #[tokio::test]
    async fn live_run_performs_file_actions() {
        let dir = tempfile::tempdir().unwrap();
        let release = dir.path().join("Release");
        std::fs::create_dir_all(release.join("VST3").join("NAM.vst3")).unwrap();
        std::fs::write(release.join("stale.txt"), "x").unwrap();
        let setup = dir.path().join("NAM-setup.exe");
        std::fs::write(&setup, b"MZ fake installer").unwrap();
        let zip = dir.path().join("NAM-v0.2.1-win.zip");
        let unpacked = dir.path().join("unpacked");

        let mut plan = Plan::new("archive");
        plan.then(Action::ClearDir(release.clone()));
        plan.then(Action::CopyFile {
            from: setup.clone(),
            to: dir.path().join("staging").join("NAM-setup.exe"),
        });
        plan.then(Action::CompressZip {
            source: setup.clone(),
            dest: zip.clone(),
        });
        plan.then(Action::ExtractZip {
            archive: zip.clone(),
            dest: unpacked.clone(),
        });

        let recorder = Recorder::default();
        Executor::new(&recorder, false).execute(&plan).await.unwrap();

        assert!(release.is_dir());
        assert_eq!(std::fs::read_dir(&release).unwrap().count(), 0);
        assert!(dir.path().join("staging").join("NAM-setup.exe").is_file());
        assert_eq!(
            std::fs::read(unpacked.join("NAM-setup.exe")).unwrap(),
            b"MZ fake installer"
        );
    }
}
