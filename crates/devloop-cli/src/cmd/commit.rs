use anyhow::{bail, Context};
use devloop_core::{exec, git};
use std::io::Write;
use std::path::Path;

/// Interactive commit-and-push. Works in any git repo under the resolved
/// root — no config needed.
pub fn run(root: &Path, message: Option<&str>, yes: bool) -> anyhow::Result<()> {
    exec::require_tools(&["git"])?;

    let status = git::status_short(root).context("failed to read git status")?;
    if status.is_empty() {
        println!("Nothing to commit, working tree clean.");
        return Ok(());
    }

    println!("Changed files:\n{status}\n");
    git::diff_stat(root)?;
    println!();

    let message = match message {
        Some(m) => m.trim().to_owned(),
        None => prompt("Commit message: ")?,
    };
    if message.is_empty() {
        bail!("commit message cannot be empty");
    }

    let branch = git::current_branch(root).context("failed to determine current branch")?;
    if !yes {
        let answer = prompt(&format!("Push to '{branch}'? (y/N): "))?;
        if !answer.eq_ignore_ascii_case("y") {
            bail!("push cancelled");
        }
    }

    git::add_all(root)?;
    git::commit(root, &message)?;
    git::push(root, &branch).context("push failed; check your connection and permissions")?;

    println!("Committed and pushed to '{branch}'.");
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_owned())
}
