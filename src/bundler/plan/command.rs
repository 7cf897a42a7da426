//! External tool invocations.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Program, arguments and working directory of an external tool invocation.
///
/// Arguments are passed to the process verbatim (no shell involved); the
/// [`Display`](fmt::Display) impl renders a POSIX-quoted command line for
/// dry runs and error messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ToolCommand {
    /// New invocation of `program` without arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends a path argument.
    pub fn arg_path(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    /// Runs the tool inside `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Program to execute.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, in order.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Working directory, if any.
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Program name when it is looked up through `PATH` rather than given as a path.
    pub fn bare_program(&self) -> Option<&str> {
        let mut components = self.program.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => name.to_str(),
            _ => None,
        }
    }

    /// Builds the process to spawn.
    pub(crate) fn to_process(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(dir) = &self.cwd {
            write!(f, "cd {} && ", shell_words::quote(&dir.to_string_lossy()))?;
        }
        let program = self.program.to_string_lossy();
        let line = shell_words::join(
            std::iter::once(program.as_ref()).chain(self.args.iter().map(String::as_str)),
        );
        f.write_str(&line)
    }
}
