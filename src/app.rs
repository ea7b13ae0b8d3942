//! CLI commands wired to the real terminal, shell and log file.

use anyhow::{Context as _, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::commands::{self, Context, Outcome};
use crate::config::{Settings, load_settings};
use crate::exec::{Executor, ShellRunner};
use crate::host::{Host, InputRequest, TerminalHost};
use crate::logging::{FileSink, MultiSink, TracingSink};
use crate::palette::{Catalog, CommandDescriptor};
use crate::paths::paths;
use crate::progress::SpinnerRunner;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Global {
    /// Project directory; defaults to the git work tree around the current dir.
    pub cwd: Option<PathBuf>,
    pub quiet: bool,
}

/// One interactive run: settings, terminal, shell and log sink.
struct Session {
    settings: Settings,
    host: TerminalHost,
    runner: SpinnerRunner<ShellRunner>,
    log: MultiSink,
}

impl Session {
    fn open(global: &Global) -> Result<Self> {
        let settings = load_settings()?;
        let log_path = match &settings.log.file {
            Some(p) => p.clone(),
            None => paths()?.log,
        };

        let mut log = MultiSink::new().with(TracingSink);
        match FileSink::open(&log_path) {
            Ok(file) => log = log.with(file),
            Err(e) => tracing::warn!("file logging disabled: {e:#}"),
        }

        Ok(Self {
            host: TerminalHost::new(global.cwd.clone()),
            runner: SpinnerRunner::new(ShellRunner, !global.quiet),
            settings,
            log,
        })
    }

    fn with_context<R>(&self, f: impl FnOnce(&Context<'_>) -> R) -> R {
        let exec = Executor::new(&self.runner, &self.host, &self.log)
            .with_binary(&self.settings.git_binary)
            .with_preview_chars(self.settings.log.preview_chars);
        let ctx = Context {
            host: &self.host,
            exec: &exec,
            settings: &self.settings,
            log: &self.log,
        };
        f(&ctx)
    }
}

fn print_entry(d: &CommandDescriptor) {
    println!(
        "- {} {} [{}]",
        d.title().bold(),
        d.description.dimmed(),
        d.command_id
    );
}

fn load_catalog() -> Result<Catalog> {
    commands::catalog().context("failed to build the command catalog")
}

/// CLI command: print every command in catalog order.
///
/// Example output:
/// ```text
/// - Add Add file contents to the index [gct.add]
/// - Commit Record changes to the repository [gct.commit]
/// ```
pub fn cmd_list() -> Result<()> {
    for d in load_catalog()?.entries() {
        print_entry(d);
    }
    Ok(())
}

/// CLI command: print the ranked matches for `query`.
pub fn cmd_search(query: &str) -> Result<()> {
    let settings = load_settings()?;
    let catalog = load_catalog()?;
    let matches = catalog.filter(query, &settings.palette.match_options());
    if matches.is_empty() {
        eprintln!("no commands match \"{query}\"");
    }
    for d in matches {
        print_entry(d);
    }
    Ok(())
}

/// CLI command: ask for a query (unless given), let the user pick one of
/// the ranked matches and run it.
pub fn cmd_palette(global: &Global, query: Option<&str>) -> Result<Outcome> {
    let session = Session::open(global)?;
    let catalog = load_catalog()?;
    let opts = session.settings.palette.match_options();

    let query = match query {
        Some(q) => q.to_string(),
        None => {
            let req = InputRequest::new("Search for Git commands")
                .placeholder("e.g. commit, push, branch");
            match session.host.input(&req)? {
                Some(q) => q,
                None => return Ok(Outcome::Cancelled),
            }
        }
    };

    session.with_context(|ctx| commands::choose_and_dispatch(&query, &catalog, &opts, ctx))
}

/// CLI command: run the handler registered under `id`.
pub fn cmd_run(global: &Global, id: &str) -> Result<Outcome> {
    let session = Session::open(global)?;
    Ok(session.with_context(|ctx| commands::dispatch(id, ctx)))
}
