use anyhow::{Result, anyhow};

use super::{Context, Outcome, current_branch, yes_no};
use crate::exec::ExecError;
use crate::host::{Choice, InputRequest};

pub(super) fn pull(ctx: &Context<'_>) -> Result<Outcome> {
    let out = ctx.exec.run("pull", None)?;
    ctx.host
        .show_info(&format!("Pull successful: {}", out.trim()));
    Ok(Outcome::Completed)
}

/// Directory name `git clone` picks for `url`.
fn repo_name(url: &str) -> &str {
    let url = url.trim_end_matches('/');
    let url = url.strip_suffix(".git").unwrap_or(url);
    url.rsplit(['/', '\\', ':']).next().unwrap_or(url)
}

pub(super) fn clone(ctx: &Context<'_>) -> Result<Outcome> {
    let req = InputRequest::new("Repository URL").placeholder("https://github.com/user/repo.git");
    let Some(url) = ctx.host.input(&req)?.filter(|u| !u.is_empty()) else {
        return Ok(Outcome::Cancelled);
    };
    let Some(target) = ctx.host.pick_folder("Select Folder for Clone")? else {
        return Ok(Outcome::Cancelled);
    };

    ctx.exec.run(&format!("clone {url}"), Some(&target))?;
    ctx.host.show_info(&format!("Cloned repository: {url}"));
    ctx.host.open_folder(&target.join(repo_name(&url)));
    Ok(Outcome::Completed)
}

/// Git's wording when the current branch tracks nothing.
fn needs_upstream(e: &ExecError) -> bool {
    let text = e.to_string();
    text.contains("no upstream") || text.contains("set upstream")
}

pub(super) fn push(ctx: &Context<'_>) -> Result<Outcome> {
    let remotes = ctx.exec.run("remote", None)?;
    if !remotes.lines().any(|r| r.trim() == "origin") {
        let choices = yes_no("Add a remote origin", "Skip adding remote");
        let add = ctx
            .host
            .pick("No remote origin found. Would you like to add one?", &choices)?;
        if add != Some(0) {
            return Ok(Outcome::Cancelled);
        }

        let req = InputRequest::new("Enter the remote repository URL")
            .placeholder("https://github.com/username/repository.git");
        let Some(url) = ctx.host.input(&req)?.filter(|u| !u.is_empty()) else {
            return Ok(Outcome::Cancelled);
        };
        ctx.exec.run(&format!("remote add origin {url}"), None)?;
        ctx.host.show_info(&format!("Added remote origin: {url}"));

        let choices = yes_no("Set upstream for the current branch", "Skip setting upstream");
        let upstream = ctx
            .host
            .pick("Do you want to set upstream for the current branch?", &choices)?;
        if upstream == Some(0) {
            let branch = current_branch(ctx)?;
            ctx.exec.run(&format!("push -u origin {branch}"), None)?;
            ctx.host.show_info(&format!(
                "Push successful and upstream set to origin/{branch}"
            ));
            return Ok(Outcome::Completed);
        }
    }

    match ctx.exec.run("push", None) {
        Ok(out) => {
            ctx.host
                .show_info(&format!("Push successful: {}", out.trim()));
            Ok(Outcome::Completed)
        }
        Err(e) if needs_upstream(&e) => offer_upstream(ctx),
        Err(e) => Err(e.into()),
    }
}

fn offer_upstream(ctx: &Context<'_>) -> Result<Outcome> {
    let branch = current_branch(ctx)?;
    ctx.log
        .warning(&format!("branch {branch} has no upstream, offering to set it"));

    let choices = yes_no("Set upstream for the current branch", "Skip setting upstream");
    let placeholder = format!("No upstream branch set for {branch}. Would you like to set it?");
    if ctx.host.pick(&placeholder, &choices)? != Some(0) {
        return Ok(Outcome::Cancelled);
    }

    ctx.exec
        .run(&format!("push --set-upstream origin {branch}"), None)
        .map_err(|e| anyhow!("Failed to set upstream: {}", e.to_string().trim_end()))?;
    ctx.host.show_info(&format!(
        "Push successful and upstream set to origin/{branch}"
    ));
    Ok(Outcome::Completed)
}

pub(super) fn push_force(ctx: &Context<'_>) -> Result<Outcome> {
    let choices = [
        Choice::new(
            "Force push with lease",
            "Safer option that protects against overwriting others' changes",
        ),
        Choice::new("Force push", "Overwrites remote branch (use with caution)"),
        Choice::new("Cancel", "Abort the force push operation"),
    ];
    let flag = match ctx.host.pick(
        "Force pushing can overwrite remote changes. How would you like to proceed?",
        &choices,
    )? {
        Some(0) => "--force-with-lease",
        Some(1) => "--force",
        _ => return Ok(Outcome::Cancelled),
    };

    let branch = current_branch(ctx)?;
    let out = ctx
        .exec
        .run(&format!("push {flag} origin {branch}"), None)?;
    let summary = match out.trim() {
        "" => format!("to origin/{branch}"),
        s => s.to_string(),
    };
    ctx.host
        .show_info(&format!("Force push successful: {summary}"));
    Ok(Outcome::Completed)
}
