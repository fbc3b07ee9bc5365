use crate::output::print_table;
use anyhow::Context;
use devloop_core::{
    config::{Check, Config},
    exec,
};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;

    let checks: Vec<&Check> = match name {
        Some(n) => {
            let check = config
                .checks
                .iter()
                .find(|c| c.name == n)
                .ok_or_else(|| anyhow::anyhow!("unknown check '{n}'"))?;
            vec![check]
        }
        None => config.checks.iter().collect(),
    };

    if checks.is_empty() {
        println!("No checks configured.");
        return Ok(());
    }

    let mut results: Vec<(String, bool)> = Vec::new();
    for check in &checks {
        println!("Running check '{}'...", check.name);
        let passed = match exec::run_step(&check.command, &root.join(&check.dir)) {
            Ok(()) => true,
            Err(err) => {
                println!("  {err}");
                false
            }
        };
        results.push((check.name.clone(), passed));
    }

    println!();
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|(name, passed)| {
            vec![
                name.clone(),
                if *passed { "pass".to_string() } else { "FAIL".to_string() },
            ]
        })
        .collect();
    print_table(&["CHECK", "RESULT"], rows);

    let failed = results.iter().filter(|(_, passed)| !passed).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} check(s) failed", results.len());
    }
    Ok(())
}
