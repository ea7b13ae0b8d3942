//! External command execution.
//!
//! [`Executor::run`] composes `<binary> <args>`, resolves a working
//! directory, runs one child through a [`ProcessRunner`] and records the
//! lifecycle in the injected [`LogSink`]. It never retries and never times
//! out; recovery belongs to the caller.

mod runner;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::logging::LogSink;

pub use runner::{ProcessOutput, ProcessRunner, ShellRunner};

/// Characters of stdout kept in the success log entry.
pub const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecError {
    #[error("No workspace folder found")]
    NoWorkingDirectory,
    #[error("{detail}")]
    ProcessFailure { detail: String },
}

/// Source of the directory used when a call names none.
pub trait ProjectRoot {
    fn active_root(&self) -> Option<PathBuf>;
}

impl ProjectRoot for Option<PathBuf> {
    fn active_root(&self) -> Option<PathBuf> {
        self.clone()
    }
}

pub struct Executor<'a> {
    runner: &'a dyn ProcessRunner,
    root: &'a dyn ProjectRoot,
    log: &'a dyn LogSink,
    binary: String,
    preview_chars: usize,
}

impl<'a> Executor<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        root: &'a dyn ProjectRoot,
        log: &'a dyn LogSink,
    ) -> Self {
        Self {
            runner,
            root,
            log,
            binary: "git".to_string(),
            preview_chars: PREVIEW_CHARS,
        }
    }

    pub fn with_binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_string();
        self
    }

    pub fn with_preview_chars(mut self, n: usize) -> Self {
        self.preview_chars = n;
        self
    }

    /// The exact line handed to the shell for `args`.
    pub fn command_line(&self, args: &str) -> String {
        if args.is_empty() {
            self.binary.clone()
        } else {
            format!("{} {}", self.binary, args)
        }
    }

    /// Run `<binary> <args>` in `cwd`, or in the active project root.
    ///
    /// Returns stdout untrimmed on exit status 0.
    ///
    /// # Errors
    /// - [`ExecError::NoWorkingDirectory`] if no directory resolves; nothing is spawned.
    /// - [`ExecError::ProcessFailure`] on a non-zero exit, a signal, or a spawn
    ///   failure. The detail is stderr verbatim when non-empty.
    pub fn run(&self, args: &str, cwd: Option<&Path>) -> Result<String, ExecError> {
        let line = self.command_line(args);

        let Some(dir) = cwd.map(Path::to_path_buf).or_else(|| self.root.active_root()) else {
            self.log
                .error(&format!("Cannot run `{line}`: no workspace folder found"));
            return Err(ExecError::NoWorkingDirectory);
        };

        self.log
            .info(&format!("Executing: {line} (cwd: {})", dir.display()));

        let detail = match self.runner.run(&line, &dir) {
            Ok(out) if out.success() => {
                self.log
                    .info(&format!("Output: {}", preview(&out.stdout, self.preview_chars)));
                return Ok(out.stdout);
            }
            Ok(out) if !out.stderr.is_empty() => out.stderr,
            Ok(out) => match out.code {
                Some(code) => format!("Command failed with exit code {code}: {line}"),
                None => format!("Command terminated by signal: {line}"),
            },
            Err(e) => e.to_string(),
        };

        self.log
            .error(&format!("Command failed: {line}: {}", detail.trim_end()));
        Err(ExecError::ProcessFailure { detail })
    }
}

/// First `max` characters of `text`, with a marker when cut.
pub fn preview(text: &str, max: usize) -> String {
    let total = text.chars().count();
    if total <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{head}...(truncated, {total} chars total)")
}
