use crate::output::{print_json, print_table};
use anyhow::Context;
use devloop_core::{config::Config, exec};
use std::path::Path;

struct Finding {
    kind: &'static str,
    name: String,
    ok: bool,
    detail: String,
}

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;

    let mut findings = Vec::new();

    for tool in &config.tools {
        let ok = exec::tool_available(tool);
        findings.push(Finding {
            kind: "tool",
            name: tool.clone(),
            ok,
            detail: if ok {
                "on PATH".to_string()
            } else {
                "not found on PATH".to_string()
            },
        });
    }

    let dirs = config
        .services
        .iter()
        .map(|s| (s.name.clone(), s.dir.clone()))
        .chain(config.build.iter().map(|b| ("build".to_string(), b.dir.clone())))
        .chain(config.checks.iter().map(|c| (c.name.clone(), c.dir.clone())));
    for (name, dir) in dirs {
        let ok = root.join(&dir).is_dir();
        findings.push(Finding {
            kind: "dir",
            name,
            ok,
            detail: if ok {
                dir
            } else {
                format!("{dir} (missing)")
            },
        });
    }

    let failed = findings.iter().filter(|f| !f.ok).count();

    if json {
        let items: Vec<serde_json::Value> = findings
            .iter()
            .map(|f| {
                serde_json::json!({
                    "kind": f.kind,
                    "name": f.name,
                    "ok": f.ok,
                    "detail": f.detail,
                })
            })
            .collect();
        print_json(&items)?;
    } else {
        let rows: Vec<Vec<String>> = findings
            .iter()
            .map(|f| {
                vec![
                    f.kind.to_string(),
                    f.name.clone(),
                    if f.ok { "ok".to_string() } else { "MISSING".to_string() },
                    f.detail.clone(),
                ]
            })
            .collect();
        print_table(&["KIND", "NAME", "STATUS", "DETAIL"], rows);
    }

    if failed > 0 {
        anyhow::bail!("environment is not ready: {failed} problem(s) found");
    }
    if !json {
        println!("\nEnvironment looks good.");
    }
    Ok(())
}
