//! Repository discovery.
//!
//! Operations always go through the `git` binary; this layer only answers
//! "which work tree is the user in". The `git2`-based implementation stays
//! private so another backend could be swapped in.

mod git2_backend;

pub use git2_backend::discover_workdir;
