use anyhow::Context;
use devloop_core::{config::Config, exec, git};
use std::path::Path;

pub fn run(root: &Path, branch: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    sync_project(root, &config, branch)
}

/// The "synchronize source" pre-step shared by `sync`, `build`, and `dev`:
/// must finish cleanly before anything downstream runs.
pub(crate) fn sync_project(
    root: &Path,
    config: &Config,
    branch: Option<&str>,
) -> anyhow::Result<()> {
    exec::require_tools(&["git"])?;
    let branch = branch.unwrap_or(&config.project.default_branch);

    println!("Syncing '{branch}' from origin...");
    let outcome = git::sync(root, branch, &config.sync.preserve)
        .with_context(|| format!("failed to sync branch '{branch}'"))?;

    if outcome.stashed && !outcome.stash_pop_conflict {
        println!("Local changes were stashed around the pull and restored.");
    }
    if outcome.stash_pop_conflict {
        println!(
            "warning: conflict while restoring stashed changes; resolve with 'git stash pop'"
        );
    }
    println!("Working tree is up to date with origin/{branch}.");
    Ok(())
}
