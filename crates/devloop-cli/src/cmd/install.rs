use anyhow::Context;
use devloop_core::{config::Config, exec};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let dirs = config.install_dirs();
    if dirs.is_empty() {
        println!("No install directories configured.");
        return Ok(());
    }
    install_in(root, &config.install.command, &dirs)
}

/// Run the install command in each directory. Directories that don't exist
/// yet are skipped with a note, not treated as errors.
pub(crate) fn install_in(root: &Path, command: &str, dirs: &[&str]) -> anyhow::Result<()> {
    for dir in dirs {
        let path = root.join(dir);
        if !path.is_dir() {
            println!("Skipping '{dir}': directory not found.");
            continue;
        }
        println!("Installing dependencies in '{dir}'...");
        exec::run_step(command, &path)
            .with_context(|| format!("dependency install failed in '{dir}'"))?;
    }
    Ok(())
}
