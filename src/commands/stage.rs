use anyhow::Result;

use super::{Context, Outcome};
use crate::host::InputRequest;

/// `git add`, either everything or the paths the user types.
pub(super) fn add(ctx: &Context<'_>) -> Result<Outcome> {
    let files = if ctx.settings.always_add_all_changes {
        ".".to_string()
    } else {
        let req = InputRequest::new("Files to add (e.g., \".\" for all files)")
            .placeholder(".")
            .value(".");
        match ctx.host.input(&req)? {
            Some(files) => files,
            None => return Ok(Outcome::Cancelled),
        }
    };

    ctx.exec.run(&format!("add {files}"), None)?;
    ctx.host.show_info(&format!("Added files: {files}"));
    Ok(Outcome::Completed)
}

/// Stage the whole work tree ahead of a commit.
pub(super) fn stage_all(ctx: &Context<'_>) -> Result<()> {
    ctx.exec.run("add .", None)?;
    ctx.host.show_info("Added all files to staging area");
    Ok(())
}
