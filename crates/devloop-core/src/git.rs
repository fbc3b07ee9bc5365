//! Git step primitives for the sync and commit workflows.
//!
//! Source-control semantics stay inside the external `git` client; these
//! helpers only compose the invocations the operator would type, rooted at
//! the project directory.

use std::path::Path;

use crate::error::Result;
use crate::exec::{run_tool_capture, run_tool_step};

pub fn current_branch(root: &Path) -> Result<String> {
    run_tool_capture("git", &["branch", "--show-current"], root)
}

pub fn status_short(root: &Path) -> Result<String> {
    run_tool_capture("git", &["status", "--short"], root)
}

/// True when the working tree has uncommitted changes.
pub fn is_dirty(root: &Path) -> Result<bool> {
    Ok(!run_tool_capture("git", &["status", "--porcelain"], root)?.is_empty())
}

pub fn fetch(root: &Path) -> Result<()> {
    run_tool_step("git", &["fetch", "origin"], root)
}

pub fn checkout(root: &Path, branch: &str) -> Result<()> {
    run_tool_step("git", &["checkout", branch], root)
}

pub fn pull(root: &Path, branch: &str) -> Result<()> {
    run_tool_step("git", &["pull", "origin", branch], root)
}

/// Discard local edits to the given paths (those that exist), so noisy
/// generated files (lockfiles) never block a pull.
pub fn discard_paths(root: &Path, paths: &[String]) -> Result<()> {
    for path in paths {
        if root.join(path).exists() {
            run_tool_step("git", &["checkout", "--", path], root)?;
        }
    }
    Ok(())
}

pub fn stash_push(root: &Path) -> Result<()> {
    run_tool_step("git", &["stash"], root)
}

pub fn stash_pop(root: &Path) -> Result<()> {
    run_tool_step("git", &["stash", "pop"], root)
}

pub fn diff_stat(root: &Path) -> Result<()> {
    run_tool_step("git", &["diff", "--stat"], root)
}

pub fn add_all(root: &Path) -> Result<()> {
    run_tool_step("git", &["add", "."], root)
}

pub fn commit(root: &Path, message: &str) -> Result<()> {
    run_tool_step("git", &["commit", "-m", message], root)
}

pub fn push(root: &Path, branch: &str) -> Result<()> {
    run_tool_step("git", &["push", "origin", branch], root)
}

// ─── Sync flow ────────────────────────────────────────────────────────────

/// What happened to local changes during a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Local changes were stashed before the pull.
    pub stashed: bool,
    /// `git stash pop` hit a conflict; the stash still holds the changes.
    pub stash_pop_conflict: bool,
}

/// Bring the working tree up to date with `origin/<branch>`.
///
/// Local edits to `preserve` paths are discarded first (they are generated
/// files), any remaining local changes are stashed around the pull and
/// restored afterwards. A pull failure restores the stash before returning
/// the error; a pop conflict is reported, not fatal — the operator resolves
/// it with `git stash pop`.
pub fn sync(root: &Path, branch: &str, preserve: &[String]) -> Result<SyncOutcome> {
    discard_paths(root, preserve)?;

    let stashed = is_dirty(root)?;
    if stashed {
        stash_push(root)?;
    }

    fetch(root)?;
    if current_branch(root)? != branch {
        checkout(root, branch)?;
    }
    if let Err(err) = pull(root, branch) {
        if stashed {
            let _ = stash_pop(root);
        }
        return Err(err);
    }

    let stash_pop_conflict = stashed && stash_pop(root).is_err();
    Ok(SyncOutcome {
        stashed,
        stash_pop_conflict,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────
