use crate::error::{DevloopError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DEVLOOP_DIR: &str = ".devloop";
pub const CONFIG_FILE: &str = ".devloop/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Service names
// ---------------------------------------------------------------------------

fn service_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex"))
}

/// Service names key log lines and `--only` selection, so they follow the
/// same shape everywhere: lowercase alphanumeric with hyphens.
pub fn validate_service_name(name: &str) -> Result<()> {
    if service_name_re().is_match(name) {
        Ok(())
    } else {
        Err(DevloopError::InvalidServiceName(name.to_owned()))
    }
}
