use anyhow::Result;

use super::stage::stage_all;
use super::{Context, Outcome, quote};
use crate::host::InputRequest;

const UNDO_WARNING: &str = "This will undo your most recent commit. \
The changes will be preserved in your working directory. Continue?";

/// Message of HEAD, or empty when there is no commit yet.
fn last_commit_message(ctx: &Context<'_>) -> String {
    match ctx.exec.run("log -1 --pretty=%B", None) {
        Ok(out) => out.trim().to_string(),
        Err(e) => {
            ctx.log.debug(&format!("no previous commit message: {e}"));
            String::new()
        }
    }
}

pub(super) fn commit(ctx: &Context<'_>) -> Result<Outcome> {
    let req = InputRequest::new("Commit message").placeholder("Enter commit message");
    let Some(message) = ctx.host.input(&req)?.filter(|m| !m.is_empty()) else {
        return Ok(Outcome::Cancelled);
    };

    if ctx.settings.auto_add_files {
        stage_all(ctx)?;
    }
    ctx.exec.run(&format!("commit -m {}", quote(&message)), None)?;
    ctx.host.show_info(&format!("Committed: {message}"));
    Ok(Outcome::Completed)
}

pub(super) fn amend(ctx: &Context<'_>) -> Result<Outcome> {
    let last = last_commit_message(ctx);
    let req = InputRequest::new("Amend commit message")
        .placeholder("Enter new commit message")
        .value(&last);
    let Some(message) = ctx.host.input(&req)? else {
        return Ok(Outcome::Cancelled);
    };

    if ctx.settings.auto_add_files {
        stage_all(ctx)?;
    }
    ctx.exec
        .run(&format!("commit --amend -m {}", quote(&message)), None)?;
    ctx.host.show_info(&format!("Commit amended: {message}"));
    Ok(Outcome::Completed)
}

/// Reword HEAD without touching the index.
pub(super) fn edit_message(ctx: &Context<'_>) -> Result<Outcome> {
    let current = ctx.exec.run("log -1 --pretty=%B", None)?.trim().to_string();
    let req = InputRequest::new("Edit commit message")
        .placeholder("Enter new commit message")
        .value(&current);

    let message = ctx.host.input(&req)?.filter(|m| !m.is_empty() && *m != current);
    let Some(message) = message else {
        ctx.host.show_info("No changes made to commit message.");
        return Ok(Outcome::Cancelled);
    };

    ctx.exec
        .run(&format!("commit --amend -m {}", quote(&message)), None)?;
    ctx.host.show_info("Successfully updated the commit message.");
    Ok(Outcome::Completed)
}

/// `reset HEAD~1`: drop the last commit, keep its changes in the work tree.
pub(super) fn undo(ctx: &Context<'_>) -> Result<Outcome> {
    if !ctx.host.confirm(UNDO_WARNING)? {
        return Ok(Outcome::Cancelled);
    }
    ctx.exec.run("reset HEAD~1", None)?;
    ctx.host.show_info(
        "Successfully undid the last commit. Changes are preserved in your working directory.",
    );
    Ok(Outcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::exec::ProcessOutput;
    use crate::logging::MemorySink;
    use crate::testing::{Answer, FakeRunner, ScriptedHost, typed, with_ctx};

    #[test]
    fn commit_stages_then_commits() {
        let host = ScriptedHost::new(vec![typed("fix: handle \"quoted\" input")]);
        let runner = FakeRunner::new();
        let log = MemorySink::new();

        let out = with_ctx(&host, &runner, &Settings::default(), &log, commit).unwrap();

        assert_eq!(out, Outcome::Completed);
        assert_eq!(
            runner.lines(),
            vec![
                "git add .",
                r#"git commit -m "fix: handle \"quoted\" input""#,
            ]
        );
        assert_eq!(
            *host.infos.borrow(),
            vec![
                "Added all files to staging area".to_string(),
                "Committed: fix: handle \"quoted\" input".to_string(),
            ]
        );
    }

    #[test]
    fn commit_skips_staging_when_disabled() {
        let host = ScriptedHost::new(vec![typed("wip")]);
        let runner = FakeRunner::new();
        let log = MemorySink::new();
        let settings = Settings {
            auto_add_files: false,
            ..Settings::default()
        };

        with_ctx(&host, &runner, &settings, &log, commit).unwrap();
        assert_eq!(runner.lines(), vec![r#"git commit -m "wip""#]);
    }

    #[test]
    fn empty_commit_message_cancels() {
        let host = ScriptedHost::new(vec![typed("")]);
        let runner = FakeRunner::new();
        let log = MemorySink::new();

        let out = with_ctx(&host, &runner, &Settings::default(), &log, commit).unwrap();
        assert_eq!(out, Outcome::Cancelled);
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn failed_staging_stops_before_commit() {
        let host = ScriptedHost::new(vec![typed("msg")]);
        let runner = FakeRunner::new().on("git add .", Ok(ProcessOutput::failed(128, "fatal: lock")));
        let log = MemorySink::new();

        let err = with_ctx(&host, &runner, &Settings::default(), &log, commit).unwrap_err();
        assert_eq!(err.to_string(), "fatal: lock");
        assert_eq!(runner.lines(), vec!["git add ."]);
    }

    #[test]
    fn amend_prefills_last_message() {
        let host = ScriptedHost::new(vec![typed("better message")]);
        let runner = FakeRunner::new().on(
            "git log -1 --pretty=%B",
            Ok(ProcessOutput::ok("old message\n\n")),
        );
        let log = MemorySink::new();

        with_ctx(&host, &runner, &Settings::default(), &log, amend).unwrap();

        assert_eq!(host.prefilled.borrow()[0].as_deref(), Some("old message"));
        assert_eq!(
            runner.lines(),
            vec![
                "git log -1 --pretty=%B",
                "git add .",
                r#"git commit --amend -m "better message""#,
            ]
        );
    }

    #[test]
    fn amend_without_history_prefills_empty() {
        let host = ScriptedHost::new(vec![Answer::Input(None)]);
        let runner = FakeRunner::new().on(
            "git log -1 --pretty=%B",
            Ok(ProcessOutput::failed(128, "fatal: no commits yet")),
        );
        let log = MemorySink::new();

        let out = with_ctx(&host, &runner, &Settings::default(), &log, amend).unwrap();
        assert_eq!(out, Outcome::Cancelled);
        assert_eq!(host.prefilled.borrow()[0].as_deref(), Some(""));
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn edit_message_ignores_unchanged_text() {
        let host = ScriptedHost::new(vec![typed("same")]);
        let runner = FakeRunner::new().on("git log -1 --pretty=%B", Ok(ProcessOutput::ok("same\n")));
        let log = MemorySink::new();

        let out = with_ctx(&host, &runner, &Settings::default(), &log, edit_message).unwrap();

        assert_eq!(out, Outcome::Cancelled);
        assert_eq!(runner.call_count(), 1);
        assert_eq!(host.infos.borrow()[0], "No changes made to commit message.");
    }

    #[test]
    fn edit_message_amends_without_staging() {
        let host = ScriptedHost::new(vec![typed("new $text")]);
        let runner = FakeRunner::new().on("git log -1 --pretty=%B", Ok(ProcessOutput::ok("old\n")));
        let log = MemorySink::new();

        with_ctx(&host, &runner, &Settings::default(), &log, edit_message).unwrap();
        assert_eq!(
            runner.lines(),
            vec!["git log -1 --pretty=%B", r#"git commit --amend -m "new \$text""#]
        );
    }

    #[test]
    fn undo_requires_confirmation() {
        let host = ScriptedHost::new(vec![Answer::Confirm(false)]);
        let runner = FakeRunner::new();
        let log = MemorySink::new();
        let out = with_ctx(&host, &runner, &Settings::default(), &log, undo).unwrap();
        assert_eq!(out, Outcome::Cancelled);
        assert_eq!(runner.call_count(), 0);

        let host = ScriptedHost::new(vec![Answer::Confirm(true)]);
        let out = with_ctx(&host, &runner, &Settings::default(), &log, undo).unwrap();
        assert_eq!(out, Outcome::Completed);
        assert_eq!(runner.lines(), vec!["git reset HEAD~1"]);
    }
}
