use anyhow::Result;

use super::{Context, Outcome, current_branch, quote};
use crate::host::InputRequest;

fn check_branch_name(name: &str, current: &str) -> Option<String> {
    let reason = if name.is_empty() {
        "Branch name cannot be empty"
    } else if name.contains(char::is_whitespace) {
        "Branch name cannot contain spaces"
    } else if name == current {
        "New name must be different from current name"
    } else {
        return None;
    };
    Some(reason.to_string())
}

pub(super) fn rename(ctx: &Context<'_>) -> Result<Outcome> {
    let current = current_branch(ctx)?;
    ctx.log.info(&format!("current branch: {current}"));

    let prompt = format!("Enter new name for branch '{current}'");
    let validate = |name: &str| check_branch_name(name, &current);
    let req = InputRequest::new(&prompt)
        .placeholder("New branch name")
        .value(&current)
        .validate(&validate);
    let Some(new_name) = ctx.host.input(&req)? else {
        return Ok(Outcome::Cancelled);
    };

    ctx.exec.run(
        &format!("branch -m {} {}", quote(&current), quote(&new_name)),
        None,
    )?;
    ctx.host.show_info(&format!(
        "Branch renamed from '{current}' to '{new_name}'"
    ));
    Ok(Outcome::Completed)
}
