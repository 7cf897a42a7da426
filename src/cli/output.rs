//! Colored terminal output.
//!
//! Progress goes to stdout, warnings to stderr. Colors are disabled when
//! the stream is not a terminal.

use crate::bundler::Reporter;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Output manager for user-facing messages.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `quiet` suppresses everything but warnings; `verbose` enables
    /// [`verbose`](Self::verbose) messages.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn stdout() -> StandardStream {
        StandardStream::stdout(if io::stdout().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        })
    }

    fn stderr() -> StandardStream {
        StandardStream::stderr(if io::stderr().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        })
    }

    fn colored(
        mut stream: StandardStream,
        spec: &ColorSpec,
        prefix: &str,
        message: &str,
    ) -> io::Result<()> {
        stream.set_color(spec)?;
        write!(stream, "{}", prefix)?;
        stream.reset()?;
        writeln!(stream, "{}", message)
    }

    /// Print a message only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        let mut stream = Self::stdout();
        stream.set_color(&spec)?;
        writeln!(stream, "{}", message)?;
        stream.reset()
    }

    /// Print a progress message.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan)).set_bold(true);
        Self::colored(Self::stdout(), &spec, "==> ", message)
    }

    /// Print a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = Self::stdout();
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        stream.set_color(&spec)?;
        writeln!(stream, "{}", title)?;
        stream.reset()?;
        writeln!(stream)
    }

    /// Print an indented line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(Self::stdout(), "    {}", message)
    }

    /// Print generated file contents between banners.
    pub fn block(&self, label: &str, contents: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = Self::stdout();
        writeln!(stream, "===== {} =====\n", label)?;
        writeln!(stream, "{}", contents.trim_end())?;
        writeln!(stream, "\n===== END {} =====", label)
    }

    /// Print a warning (shown even in quiet mode).
    pub fn warn(&self, message: &str) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
        Self::colored(Self::stderr(), &spec, "warning: ", message)
    }

    /// Print a success message.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = Self::stdout();
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        stream.set_color(&spec)?;
        writeln!(stream, "{}", message)?;
        stream.reset()
    }
}

impl Reporter for OutputManager {
    fn section(&self, title: &str) -> io::Result<()> {
        OutputManager::section(self, title)
    }

    fn progress(&self, message: &str) -> io::Result<()> {
        OutputManager::progress(self, message)
    }

    fn detail(&self, line: &str) -> io::Result<()> {
        self.indent(line)
    }

    fn block(&self, label: &str, contents: &str) -> io::Result<()> {
        OutputManager::block(self, label, contents)
    }

    fn warn(&self, message: &str) -> io::Result<()> {
        OutputManager::warn(self, message)
    }

    fn success(&self, message: &str) -> io::Result<()> {
        OutputManager::success(self, message)
    }
}
