//! Command handlers behind the palette.
//!
//! Each handler gathers input through the [`Host`], builds argument strings
//! and runs them through the [`Executor`] one at a time. [`dispatch`] is the
//! boundary: whatever a handler returns, the user gets a notification and
//! the log gets an entry, and nothing propagates further.

mod branch;
mod commit;
mod remote;
mod stage;

use anyhow::Result;

use crate::config::Settings;
use crate::exec::Executor;
use crate::host::{Choice, Host};
use crate::logging::LogSink;
use crate::palette::{Catalog, CatalogError, CommandDescriptor, MatchOptions};

/// Everything a handler may touch.
pub struct Context<'a> {
    pub host: &'a dyn Host,
    pub exec: &'a Executor<'a>,
    pub settings: &'a Settings,
    pub log: &'a dyn LogSink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// A prompt was dismissed before anything ran to completion.
    Cancelled,
    /// Set by [`dispatch`] only; handlers report failure through `Err`.
    Failed,
}

type Handler = fn(&Context<'_>) -> Result<Outcome>;

struct Registration {
    id: &'static str,
    title: &'static str,
    label: &'static str,
    description: &'static str,
    keywords: &'static [&'static str],
    handler: Handler,
}

const REGISTRY: &[Registration] = &[
    Registration {
        id: "gct.add",
        title: "Git Add",
        label: "$(add) Add",
        description: "Add file contents to the index",
        keywords: &["add", "stage", "index", "changes"],
        handler: stage::add,
    },
    Registration {
        id: "gct.commit",
        title: "Git Commit",
        label: "$(check) Commit",
        description: "Record changes to the repository",
        keywords: &["commit", "save", "record", "changes"],
        handler: commit::commit,
    },
    Registration {
        id: "gct.commit-amend",
        title: "Git Commit Amend",
        label: "$(checklist) Commit Amend",
        description: "Amend the previous commit",
        keywords: &["commit", "amend", "edit", "change", "previous"],
        handler: commit::amend,
    },
    Registration {
        id: "gct.edit-commit-message",
        title: "Git Edit Commit Message",
        label: "$(edit) Edit Commit Message",
        description: "Reword the most recent commit",
        keywords: &["reword", "message", "edit", "amend"],
        handler: commit::edit_message,
    },
    Registration {
        id: "gct.clone",
        title: "Git Clone",
        label: "$(repo-clone) Clone",
        description: "Clone a repository into a new directory",
        keywords: &["clone", "download", "repository", "repo"],
        handler: remote::clone,
    },
    Registration {
        id: "gct.pull",
        title: "Git Pull",
        label: "$(sync) Pull",
        description: "Fetch from and integrate with another repository",
        keywords: &["pull", "fetch", "download", "update"],
        handler: remote::pull,
    },
    Registration {
        id: "gct.push",
        title: "Git Push",
        label: "$(cloud-upload) Push",
        description: "Push local changes to a remote repository",
        keywords: &["push", "upload", "publish", "remote"],
        handler: remote::push,
    },
    Registration {
        id: "gct.push-force",
        title: "Git Push Force",
        label: "$(warning) Push Force",
        description: "Overwrite the remote branch with local history",
        keywords: &["push", "force", "lease", "overwrite"],
        handler: remote::push_force,
    },
    Registration {
        id: "gct.rename-branch",
        title: "Git Rename Branch",
        label: "$(git-branch) Rename Branch",
        description: "Rename the current branch",
        keywords: &["branch", "rename", "move"],
        handler: branch::rename,
    },
    Registration {
        id: "gct.undo-commit",
        title: "Git Undo Commit",
        label: "$(discard) Undo Commit",
        description: "Undo the most recent commit, keeping its changes",
        keywords: &["undo", "reset", "revert", "uncommit"],
        handler: commit::undo,
    },
];

/// The palette's catalog: one entry per registered handler.
///
/// # Errors
/// Returns [`CatalogError`] if two registrations share an id.
pub fn catalog() -> Result<Catalog, CatalogError> {
    let entries = REGISTRY
        .iter()
        .map(|r| CommandDescriptor::new(r.label, r.description, r.keywords, r.id))
        .collect();
    Catalog::new(entries)
}

/// Run the handler registered under `command_id`.
///
/// Errors and cancellations are turned into notifications and log entries
/// here; the returned [`Outcome`] is informational.
pub fn dispatch(command_id: &str, ctx: &Context<'_>) -> Outcome {
    let Some(reg) = REGISTRY.iter().find(|r| r.id == command_id) else {
        let msg = format!("Unknown command: {command_id}");
        ctx.log.error(&msg);
        ctx.host.show_error(&msg);
        return Outcome::Failed;
    };

    ctx.log.info(&format!("{} command started", reg.title));
    match (reg.handler)(ctx) {
        Ok(Outcome::Cancelled) => {
            ctx.log.info(&format!("{} cancelled by user", reg.title));
            Outcome::Cancelled
        }
        Ok(outcome) => {
            ctx.log.info(&format!("{} completed", reg.title));
            outcome
        }
        Err(e) => {
            ctx.log
                .error(&format!("{} Error: {}", reg.title, format!("{e:#}").trim_end()));
            ctx.host
                .show_error(&format!("{} Error: {}", reg.title, e.to_string().trim_end()));
            Outcome::Failed
        }
    }
}

/// Let the user pick among the matches for `query`, then dispatch it.
pub fn choose_and_dispatch(
    query: &str,
    catalog: &Catalog,
    opts: &MatchOptions,
    ctx: &Context<'_>,
) -> Result<Outcome> {
    let matches = catalog.filter(query, opts);
    if matches.is_empty() {
        ctx.host.show_info(&format!("No commands match \"{query}\""));
        return Ok(Outcome::Cancelled);
    }

    let choices: Vec<Choice> = matches
        .iter()
        .map(|d| Choice::new(d.title(), &d.description))
        .collect();
    let Some(i) = ctx.host.pick("Search for Git commands", &choices)? else {
        return Ok(Outcome::Cancelled);
    };
    Ok(dispatch(&matches[i].command_id, ctx))
}

/// Wrap `s` in double quotes for the shell, escaping what sh expands there.
#[cfg(not(windows))]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Wrap `s` in double quotes for `cmd /C`.
///
/// `cmd` leaves the quoted text alone; the child's argument parser treats
/// `\"` as a literal quote and backslashes as literal unless they precede a
/// quote, so only those runs are doubled.
#[cfg(windows)]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut backslashes = 0;
    for ch in s.chars() {
        match ch {
            '\\' => backslashes += 1,
            '"' => {
                out.extend(std::iter::repeat_n('\\', backslashes * 2 + 1));
                backslashes = 0;
            }
            _ => {
                out.extend(std::iter::repeat_n('\\', backslashes));
                backslashes = 0;
            }
        }
        if ch != '\\' {
            out.push(ch);
        }
    }
    out.extend(std::iter::repeat_n('\\', backslashes * 2));
    out.push('"');
    out
}

fn current_branch(ctx: &Context<'_>) -> Result<String> {
    Ok(ctx.exec.run("branch --show-current", None)?.trim().to_string())
}

fn yes_no(yes: &str, no: &str) -> [Choice; 2] {
    [Choice::new("Yes", yes), Choice::new("No", no)]
}
