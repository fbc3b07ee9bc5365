use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn devloop(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("devloop").unwrap();
    cmd.current_dir(dir.path()).env("DEVLOOP_ROOT", dir.path());
    cmd
}

fn write_config(dir: &TempDir, yaml: &str) {
    std::fs::create_dir_all(dir.path().join(".devloop")).unwrap();
    std::fs::write(dir.path().join(".devloop/config.yaml"), yaml).unwrap();
}

fn git(dir: &TempDir, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(args)
        .current_dir(dir.path())
        .status()
        .expect("git runs");
    assert!(status.success(), "git {args:?} failed");
}

fn init_repo(dir: &TempDir) {
    git(dir, &["init", "--initial-branch=main"]);
    git(dir, &["config", "user.email", "dev@example.com"]);
    git(dir, &["config", "user.name", "Dev"]);
}

// ---------------------------------------------------------------------------
// devloop init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    devloop(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .devloop/config.yaml"));

    assert!(dir.path().join(".devloop/config.yaml").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    devloop(&dir).arg("init").assert().success();
    devloop(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .devloop/config.yaml"));
}

// ---------------------------------------------------------------------------
// devloop config
// ---------------------------------------------------------------------------

#[test]
fn config_show_fails_before_init() {
    let dir = TempDir::new().unwrap();
    devloop(&dir)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn scaffolded_config_validates_clean() {
    let dir = TempDir::new().unwrap();
    devloop(&dir).arg("init").assert().success();
    devloop(&dir)
        .args(["config", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK."));
}

#[test]
fn config_show_json_is_valid_json() {
    let dir = TempDir::new().unwrap();
    devloop(&dir).arg("init").assert().success();

    let output = devloop(&dir)
        .args(["--json", "config", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert!(value["project"]["name"].is_string());
    assert_eq!(value["project"]["default_branch"], "main");
}

#[test]
fn config_check_reports_errors_nonzero() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"
project:
  name: webapp
services:
  - name: frontend
    dir: ui
    command: npm run dev
  - name: frontend
    dir: ui2
    command: npm run dev
"#,
    );
    devloop(&dir)
        .args(["config", "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("duplicate service name"));
}

// ---------------------------------------------------------------------------
// devloop doctor
// ---------------------------------------------------------------------------

#[test]
fn doctor_flags_missing_service_dirs() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"
project:
  name: webapp
services:
  - name: frontend
    dir: frontend/dashboard
    command: npm run dev
tools: [git]
"#,
    );
    devloop(&dir)
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("MISSING"))
        .stdout(predicate::str::contains("frontend"))
        .stderr(predicate::str::contains("environment is not ready"));
}

#[test]
fn doctor_passes_when_everything_exists() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"
project:
  name: webapp
services:
  - name: web
    dir: web
    command: "sleep 1"
tools: [git, sh]
"#,
    );
    std::fs::create_dir_all(dir.path().join("web")).unwrap();
    devloop(&dir)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Environment looks good."));
}

// ---------------------------------------------------------------------------
// devloop check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_pass_and_fail() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"
project:
  name: webapp
checks:
  - name: good
    command: "true"
  - name: bad
    command: "false"
"#,
    );
    devloop(&dir)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("pass"))
        .stdout(predicate::str::contains("FAIL"))
        .stderr(predicate::str::contains("1 of 2 check(s) failed"));
}

#[test]
fn check_single_by_name() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"
project:
  name: webapp
checks:
  - name: good
    command: "true"
  - name: bad
    command: "false"
"#,
    );
    devloop(&dir).args(["check", "good"]).assert().success();
}

#[test]
fn check_unknown_name_fails() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "project:\n  name: webapp\n");
    devloop(&dir)
        .args(["check", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown check 'nope'"));
}

// ---------------------------------------------------------------------------
// devloop dev
// ---------------------------------------------------------------------------

#[test]
fn dev_rejects_unknown_only_name() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"
project:
  name: webapp
services:
  - name: web
    dir: .
    command: "sleep 30"
tools: [git]
"#,
    );
    devloop(&dir)
        .args(["dev", "--only", "bogus", "--no-sync", "--no-install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown service: bogus"));
}

#[test]
fn dev_crashing_service_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"
project:
  name: webapp
services:
  - name: boom
    dir: .
    command: "exit 7"
tools: [git]
"#,
    );
    devloop(&dir)
        .args(["dev", "--no-sync", "--no-install"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Starting 'boom'"))
        .stderr(predicate::str::contains("exited unexpectedly (code 7)"));
}

// ---------------------------------------------------------------------------
// devloop commit
// ---------------------------------------------------------------------------

#[test]
fn commit_clean_tree_exits_zero() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    devloop(&dir)
        .arg("commit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to commit"));
}

#[test]
fn commit_empty_message_aborts() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    std::fs::write(dir.path().join("app.js"), "x").unwrap();

    devloop(&dir)
        .arg("commit")
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("commit message cannot be empty"));
}

#[test]
fn commit_declined_push_aborts() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    std::fs::write(dir.path().join("app.js"), "x").unwrap();

    devloop(&dir)
        .args(["commit", "-m", "feat: change"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("push cancelled"));
}

// ---------------------------------------------------------------------------
// devloop sync
// ---------------------------------------------------------------------------

#[test]
fn sync_outside_git_repo_fails() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "project:\n  name: webapp\n");
    devloop(&dir)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
