use git2::Repository;
use std::path::{Path, PathBuf};

/// Find the work tree containing `start`.
///
/// Walks up from `start` the way `git` itself does. Bare repositories have no
/// work tree and yield `None`, as does a path outside any repository.
pub fn discover_workdir(start: &Path) -> Option<PathBuf> {
    let repo = match Repository::discover(start) {
        Ok(repo) => repo,
        Err(e) => {
            tracing::debug!("no repository above {}: {}", start.display(), e.message());
            return None;
        }
    };
    repo.workdir().map(Path::to_path_buf)
}
