//! One-shot external command execution.
//!
//! Every workflow step (git, package manager, build, smoke checks) is a
//! plain foreground child process. Config-provided steps are operator
//! command strings and run through `sh -c`; fixed tool invocations build
//! their argv directly. Output streams to the terminal in real time.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{DevloopError, Result};

/// Run an operator command string through the shell in `cwd`, echoing the
/// command and streaming its output.
///
/// # Errors
///
/// `DirectoryNotFound` if `cwd` does not exist; `StepFailed` with the exit
/// code on non-zero exit.
pub fn run_step(command: &str, cwd: &Path) -> Result<()> {
    if !cwd.is_dir() {
        return Err(DevloopError::DirectoryNotFound(cwd.to_path_buf()));
    }
    println!("  $ {command}");
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .status()?;
    check_status(command, status.code(), status.success())
}

/// Run a fixed tool invocation (no shell) in `cwd`, echoing and streaming.
pub fn run_tool_step(program: &str, args: &[&str], cwd: &Path) -> Result<()> {
    println!("  $ {program} {}", args.join(" "));
    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()?;
    check_status(
        &format!("{program} {}", args.join(" ")),
        status.code(),
        status.success(),
    )
}

/// Run a fixed tool invocation and capture its trimmed stdout. Stderr
/// flows through to the terminal.
pub fn run_tool_capture(program: &str, args: &[&str], cwd: &Path) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()?;
    check_status(
        &format!("{program} {}", args.join(" ")),
        output.status.code(),
        output.status.success(),
    )?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
}

fn check_status(command: &str, code: Option<i32>, success: bool) -> Result<()> {
    if success {
        Ok(())
    } else {
        Err(DevloopError::StepFailed {
            command: command.to_owned(),
            code: code.unwrap_or(-1),
        })
    }
}

/// True when `tool` resolves on PATH.
pub fn tool_available(tool: &str) -> bool {
    which::which(tool).is_ok()
}

/// Fail on the first required tool missing from PATH.
pub fn require_tools<S: AsRef<str>>(tools: &[S]) -> Result<()> {
    for tool in tools {
        if !tool_available(tool.as_ref()) {
            return Err(DevloopError::MissingTool(tool.as_ref().to_owned()));
        }
    }
    Ok(())
}
