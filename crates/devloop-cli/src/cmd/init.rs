use anyhow::Context;
use devloop_core::{io, paths};
use std::path::Path;

/// Scaffolded config. Valid YAML as written, with the two services the
/// typical web project splits into; the operator edits from here.
const CONFIG_TEMPLATE: &str = r#"version: 1

project:
  name: {name}
  default_branch: main

# Long-running dev services, launched together by `devloop dev`.
services:
  - name: frontend
    dir: frontend/dashboard
    command: npm run dev
  - name: server
    dir: server
    command: npm run dev

# Dependency install step. `dirs` defaults to every service directory.
install:
  command: npm install

# Frontend bundle build, used by `devloop build` and `devloop dev --build`.
build:
  dir: frontend/dashboard
  command: npm run build

# Generated files whose local edits are discarded before a pull.
sync:
  preserve:
    - frontend/dashboard/package-lock.json

# Smoke checks for `devloop check`: external scripts judged by exit code.
#checks:
#  - name: login-smoke
#    dir: verification
#    command: node verify_login.js
"#;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    println!("Initializing devloop in: {}", root.display());

    let devloop_dir = root.join(paths::DEVLOOP_DIR);
    io::ensure_dir(&devloop_dir)
        .with_context(|| format!("failed to create {}", devloop_dir.display()))?;

    let config_path = paths::config_path(root);
    let template = CONFIG_TEMPLATE.replace("{name}", &project_name);
    if io::write_if_missing(&config_path, template.as_bytes())
        .context("failed to write config.yaml")?
    {
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    println!("\nNext: edit {} for your project, then run 'devloop doctor'.", paths::CONFIG_FILE);
    Ok(())
}
