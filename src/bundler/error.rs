//! Error types for bundler operations.
//!
//! Mirrors the layered approach used across the bundler: a single [`Error`] enum,
//! a [`Context`] trait for attaching human-readable context to results and options,
//! and [`ErrorExt`] for tagging IO failures with the path and action involved.

use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the bundler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with additional context.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// Filesystem operation failed.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        error: io::Error,
    },

    /// External command could not be started.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Spawn error
        error: io::Error,
    },

    /// External command ran but exited unsuccessfully.
    #[error("command `{command}` failed with exit code {}", display_code(.code))]
    ToolFailed {
        /// Rendered command line
        command: String,
        /// Exit code (None when terminated by a signal)
        code: Option<i32>,
    },

    /// Required external tool is not on PATH.
    #[error("`{tool}` not found in PATH. {hint}")]
    ToolNotFound {
        /// Program name
        tool: String,
        /// Installation hint
        hint: String,
    },

    /// CMakeLists.txt field missing or empty.
    #[error("could not read {field} from {}", .path.display())]
    MissingField {
        /// CMake variable name
        field: &'static str,
        /// File that was searched
        path: PathBuf,
    },

    /// Operation requires a different host operating system.
    #[error("`{operation}` is only supported on {required} (use --dryrun to preview the plan)")]
    UnsupportedHost {
        /// Subcommand name
        operation: &'static str,
        /// Required host OS
        required: &'static str,
    },

    /// Configuration file could not be parsed.
    #[error("invalid configuration {}: {error}", .path.display())]
    Config {
        /// Configuration file
        path: PathBuf,
        /// Parse error
        error: toml::de::Error,
    },

    /// IO error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// HTTP download error.
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Zip archive error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Template registration error.
    #[error("template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Template rendering error.
    #[error("template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Generic error.
    #[error("{0}")]
    GenericError(String),
}

impl From<handlebars::TemplateError> for Error {
    fn from(error: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(error))
    }
}

fn display_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "<signal>".to_string())
}

/// Convenient early return with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

/// Attach context to a result or option.
pub trait Context<T> {
    /// Wrap the error value with additional context.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error value with additional context that is evaluated lazily.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Tag IO errors with the action and path that produced them.
pub trait ErrorExt<T> {
    /// Convert to [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing() -> Result<()> {
        bail!("tool {} exploded", "pkgbuild")
    }

    #[test]
    fn bail_formats_message() {
        let err = failing().unwrap_err();
        assert_eq!(err.to_string(), "tool pkgbuild exploded");
    }

    #[test]
    fn context_wraps_result_errors() {
        let err = failing().context("building VST3 package").unwrap_err();
        assert_eq!(err.to_string(), "building VST3 package: tool pkgbuild exploded");
    }

    #[test]
    fn context_on_none_is_generic_error() {
        let err = None::<u8>.context("no icon").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "no icon"));
    }

    #[test]
    fn fs_context_names_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.fs_context("reading", "/tmp/CMakeLists.txt").unwrap_err();
        assert_eq!(err.to_string(), "reading /tmp/CMakeLists.txt: gone");
    }

    #[test]
    fn tool_failed_reports_exit_code() {
        let err = Error::ToolFailed {
            command: "cmake --build build".into(),
            code: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "command `cmake --build build` failed with exit code 2"
        );
    }
}
