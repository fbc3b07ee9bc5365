use anyhow::Context;
use devloop_core::{config::Config, exec};
use std::path::Path;

pub fn run(root: &Path, no_sync: bool, no_install: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let build = config
        .build
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no build step configured in .devloop/config.yaml"))?;

    exec::require_tools(&config.tools).context("environment check failed")?;

    if !no_sync {
        crate::cmd::sync::sync_project(root, &config, None)?;
    }
    if !no_install {
        crate::cmd::install::install_in(root, &config.install.command, &[build.dir.as_str()])?;
    }

    println!("Building in '{}'...", build.dir);
    exec::run_step(&build.command, &root.join(&build.dir)).context("build failed")?;
    println!("Build finished: {}", build.dir);
    Ok(())
}
