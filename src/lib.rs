//! Crate entry point for **gct**.
//!
//! This library provides the implementation behind the `gct` CLI: a fuzzy
//! command palette over a small set of git workflows.
//! - [`palette`] ranks command descriptors against a query.
//! - [`exec`] runs one git command line and logs what happened.
//! - [`commands`] holds the handlers the palette dispatches to.
//!
//! The `pub use` re-exports make the CLI commands and the core types
//! reachable from the crate root.

mod app;
pub mod commands;
mod config;
pub mod exec;
mod git;
pub mod host;
pub mod logging;
pub mod palette;
mod paths;
mod progress;
#[cfg(test)]
mod testing;

pub use app::{Global, cmd_list, cmd_palette, cmd_run, cmd_search};
pub use commands::Outcome;
pub use config::{Settings, load_settings};
pub use exec::{ExecError, Executor, ProcessOutput, ProcessRunner, ShellRunner};
pub use logging::init_tracing;
pub use palette::{CommandDescriptor, MatchOptions, filter_commands, filter_commands_with};
pub use paths::gct_home;
