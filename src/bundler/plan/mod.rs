//! Execution plans.
//!
//! Every subcommand first builds a [`Plan`]: an ordered list of [`Step`]s, each
//! wrapping one [`Action`]. Planning only inspects the filesystem (existence
//! checks, reading `CMakeLists.txt`); all side effects happen when the
//! [`Executor`] runs the plan, which makes dry runs a matter of reporting the
//! steps instead of performing them.

mod command;
mod executor;

pub use command::ToolCommand;
pub use executor::{Executor, Reporter};

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Text encoding for generated files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileEncoding {
    /// Plain UTF-8
    Utf8,
    /// UTF-8 preceded by a byte order mark (Inno Setup scripts)
    Utf8Bom,
}

/// A single side effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Create a directory and its parents.
    CreateDir(PathBuf),
    /// Remove every entry inside a directory, keeping the directory.
    ClearDir(PathBuf),
    /// Remove a file.
    RemoveFile(PathBuf),
    /// Remove a directory tree.
    RemoveDir(PathBuf),
    /// Copy a file, creating the destination's parent directories.
    CopyFile {
        /// Source file
        from: PathBuf,
        /// Destination file
        to: PathBuf,
    },
    /// Write a generated text file.
    WriteFile {
        /// Destination
        path: PathBuf,
        /// Banner label shown in dry runs (e.g. `XML CONFIG`)
        label: String,
        /// File contents
        contents: String,
        /// Encoding
        encoding: FileEncoding,
        /// Set the executable bit (Unix only)
        executable: bool,
    },
    /// Download a URL to a file, following redirects.
    Download {
        /// Source URL
        url: String,
        /// Destination file
        dest: PathBuf,
    },
    /// Unpack a zip archive into a directory.
    ExtractZip {
        /// Archive file
        archive: PathBuf,
        /// Destination directory
        dest: PathBuf,
    },
    /// Store a single file in a new zip archive.
    CompressZip {
        /// File to store
        source: PathBuf,
        /// Archive to create
        dest: PathBuf,
    },
    /// Run an external tool.
    Run(ToolCommand),
}

/// An [`Action`] with an optional progress message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    description: Option<String>,
    action: Action,
    optional: bool,
}

impl Step {
    /// Progress message printed before the action.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The side effect.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Whether a failure only warns instead of aborting the plan.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The external command, when the action runs one.
    pub fn command(&self) -> Option<&ToolCommand> {
        match &self.action {
            Action::Run(command) => Some(command),
            _ => None,
        }
    }

    /// Marks the step as optional.
    pub fn optional(&mut self) -> &mut Self {
        self.optional = true;
        self
    }
}

/// Ordered list of steps for one subcommand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    title: String,
    warnings: Vec<String>,
    steps: Vec<Step>,
}

impl Plan {
    /// Creates an empty plan; `title` is printed as the section header.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            warnings: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Section header.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Problems found while planning, reported before the first step.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Records a planning problem that does not stop the plan.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Appends a step with a progress message.
    pub fn step(&mut self, description: impl Into<String>, action: Action) -> &mut Step {
        self.push(Some(description.into()), action)
    }

    /// Appends a step without a progress message.
    pub fn then(&mut self, action: Action) -> &mut Step {
        self.push(None, action)
    }

    fn push(&mut self, description: Option<String>, action: Action) -> &mut Step {
        self.steps.push(Step {
            description,
            action,
            optional: false,
        });
        let last = self.steps.len() - 1;
        &mut self.steps[last]
    }

    /// External commands in execution order.
    pub fn commands(&self) -> impl Iterator<Item = &ToolCommand> {
        self.steps.iter().filter_map(Step::command)
    }

    /// Bare program names (resolved through `PATH`) required by required steps.
    ///
    /// Programs given as paths are excluded since earlier steps may create them.
    pub fn required_tools(&self) -> BTreeSet<&str> {
        self.steps
            .iter()
            .filter(|step| !step.optional)
            .filter_map(|step| match &step.action {
                Action::Run(command) => command.bare_program(),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_keep_insertion_order_and_flags() {
        let mut plan = Plan::new("demo");
        plan.step("Creating out...", Action::CreateDir("out".into()));
        plan.then(Action::Run(ToolCommand::new("sips").arg("-z")))
            .optional();
        plan.then(Action::Run(ToolCommand::new("productbuild")));

        let steps = plan.steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].description(), Some("Creating out..."));
        assert!(!steps[0].is_optional());
        assert!(steps[1].is_optional());
        assert_eq!(plan.commands().count(), 2);
    }

    #[test]
    fn required_tools_skip_optional_steps_and_paths() {
        let mut plan = Plan::new("demo");
        plan.then(Action::Run(ToolCommand::new("cmake")));
        plan.then(Action::Run(ToolCommand::new("cmake").arg("--build")));
        plan.then(Action::Run(ToolCommand::new("Rez"))).optional();
        plan.then(Action::Run(ToolCommand::new(
            PathBuf::from("isp").join("app").join("ISCC.exe"),
        )));

        let tools: Vec<_> = plan.required_tools().into_iter().collect();
        assert_eq!(tools, vec!["cmake"]);
    }
}
