use anyhow::Context;
use devloop_core::{
    config::{Config, Service},
    exec,
};
use devloop_supervisor::{ServiceSpec, Supervisor};
use std::path::Path;
use std::time::Duration;

pub struct DevOptions {
    pub branch: Option<String>,
    pub no_sync: bool,
    pub no_install: bool,
    pub only: Vec<String>,
    pub build: bool,
}

pub fn run(root: &Path, opts: DevOptions) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    exec::require_tools(&config.tools).context("environment check failed")?;

    if opts.build {
        return crate::cmd::build::run(root, opts.no_sync, opts.no_install);
    }

    // Resolve the subset up front so a typo in --only fails before any work.
    let selected = select_services(&config, &opts.only)?;

    if !opts.no_sync {
        crate::cmd::sync::sync_project(root, &config, opts.branch.as_deref())?;
    }

    if !opts.no_install {
        let dirs: Vec<&str> = selected.iter().map(|s| s.dir.as_str()).collect();
        crate::cmd::install::install_in(root, &config.install.command, &dirs)?;
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_session(root, &selected))
}

fn select_services<'a>(config: &'a Config, only: &[String]) -> anyhow::Result<Vec<&'a Service>> {
    if only.is_empty() {
        if config.services.is_empty() {
            anyhow::bail!("no services configured in .devloop/config.yaml");
        }
        return Ok(config.services.iter().collect());
    }
    only.iter()
        .map(|name| config.service(name).map_err(anyhow::Error::from))
        .collect()
}

async fn run_session(root: &Path, services: &[&Service]) -> anyhow::Result<()> {
    let mut supervisor = Supervisor::new();

    for (i, service) in services.iter().enumerate() {
        if i > 0 {
            // Head start so the services' startup logs don't interleave.
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        println!("Starting '{}'...", service.name);
        let spec = ServiceSpec {
            name: service.name.clone(),
            command: service.command.clone(),
            dir: root.join(&service.dir),
        };
        if let Err(err) = supervisor.launch(&spec) {
            // A failed launch must not leave the earlier services dangling.
            supervisor.shutdown_all().await;
            return Err(err).context("launch failed");
        }
    }

    println!("\nServices running. Press ctrl-c to stop everything.\n");
    supervisor.monitor().await?;
    println!("All services stopped.");
    Ok(())
}
