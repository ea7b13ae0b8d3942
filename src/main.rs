//! # gct
//!
//! **gct** is a fuzzy command palette for everyday git workflows.
//!
//! Features:
//! - `gct palette [QUERY]` ranks the commands against a query and runs the pick
//! - `gct search QUERY` prints the ranked matches
//! - `gct run ID` runs one command directly
//! - `gct list` prints every command
//! - `gct home` prints the gct config directory
//!
//! Every git invocation is appended to `$(gct home)/gct.log`.
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use clap::{Parser, Subcommand};
use gct::{Global, Outcome, cmd_list, cmd_palette, cmd_run, cmd_search, gct_home, init_tracing};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line interface definition.
#[derive(Parser, Debug)]
#[command(
    name = "gct",
    version,
    about = "gct - fuzzy command palette for git",
    arg_required_else_help = true
)]
struct Cli {
    /// Run git in DIR instead of the repository around the current directory
    #[arg(long, global = true, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show errors; hide the progress spinner
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Cmd {
    /// Pick a command from ranked fuzzy matches and run it
    Palette {
        /// Search text; prompted for when omitted
        query: Option<String>,
    },
    /// Print the commands matching QUERY, best first
    Search { query: String },
    /// List every available command
    List,
    /// Run a command by id (e.g. gct.pull)
    Run { id: String },
    /// Print the gct home directory
    Home,
}

fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Failed => ExitCode::FAILURE,
        Outcome::Completed | Outcome::Cancelled => ExitCode::SUCCESS,
    }
}

/// CLI entry point.
///
/// Parses arguments with `clap` and executes the selected subcommand.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    let global = Global {
        cwd: cli.cwd,
        quiet: cli.quiet,
    };

    match cli.cmd {
        Cmd::Palette { query } => cmd_palette(&global, query.as_deref()).map(exit_code),
        Cmd::Search { query } => cmd_search(&query).map(|()| ExitCode::SUCCESS),
        Cmd::List => cmd_list().map(|()| ExitCode::SUCCESS),
        Cmd::Run { id } => cmd_run(&global, &id).map(exit_code),
        Cmd::Home => {
            println!("{}", gct_home()?.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
