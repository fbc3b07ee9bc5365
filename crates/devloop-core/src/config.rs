use crate::error::{DevloopError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default = "default_branch")]
    pub default_branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// A long-running dev service the supervisor can launch: `dir` is relative
/// to the project root, `command` is the shell command to run there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub dir: String,
    #[serde(default = "default_dev_command")]
    pub command: String,
}

fn default_dev_command() -> String {
    "npm run dev".to_string()
}

// ---------------------------------------------------------------------------
// InstallConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Directories to install in; empty means "every service directory".
    #[serde(default)]
    pub dirs: Vec<String>,
    #[serde(default = "default_install_command")]
    pub command: String,
}

fn default_install_command() -> String {
    "npm install".to_string()
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            command: default_install_command(),
        }
    }
}

// ---------------------------------------------------------------------------
// BuildConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub dir: String,
    #[serde(default = "default_build_command")]
    pub command: String,
}

fn default_build_command() -> String {
    "npm run build".to_string()
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// A smoke check: an external command (e.g. a browser-automation script)
/// run from `dir`, judged by its exit code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    #[serde(default = "default_check_dir")]
    pub dir: String,
    pub command: String,
}

fn default_check_dir() -> String {
    ".".to_string()
}

// ---------------------------------------------------------------------------
// SyncConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Generated files whose local edits are discarded before a pull
    /// (lockfiles churned by every install).
    #[serde(default)]
    pub preserve: Vec<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: ProjectConfig,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub install: InstallConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<Check>,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default = "default_tools")]
    pub tools: Vec<String>,
}

fn default_version() -> u32 {
    1
}

fn default_tools() -> Vec<String> {
    vec!["git".to_string(), "node".to_string(), "npm".to_string()]
}

impl Config {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: ProjectConfig {
                name: project_name.into(),
                default_branch: default_branch(),
            },
            services: Vec::new(),
            install: InstallConfig::default(),
            build: None,
            checks: Vec::new(),
            sync: SyncConfig::default(),
            tools: default_tools(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(DevloopError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn service(&self, name: &str) -> Result<&Service> {
        self.services
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| DevloopError::ServiceNotFound(name.to_owned()))
    }

    pub fn service_names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name.as_str()).collect()
    }

    /// Directories the install step runs in: the configured list, or every
    /// service directory when the list is empty.
    pub fn install_dirs(&self) -> Vec<&str> {
        if self.install.dirs.is_empty() {
            self.services.iter().map(|s| s.dir.as_str()).collect()
        } else {
            self.install.dirs.iter().map(|d| d.as_str()).collect()
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // 1. Service names must be well-formed and unique.
        for (i, service) in self.services.iter().enumerate() {
            if paths::validate_service_name(&service.name).is_err() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "invalid service name '{}': must be lowercase alphanumeric with hyphens",
                        service.name
                    ),
                });
            }
            if self.services[..i].iter().any(|s| s.name == service.name) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("duplicate service name '{}'", service.name),
                });
            }
            if service.command.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("service '{}' has an empty command", service.name),
                });
            }
        }

        // 2. Checks need a command to run.
        for check in &self.checks {
            if check.command.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("check '{}' has an empty command", check.name),
                });
            }
        }

        // 3. Absolute directories tie the config to one machine.
        let dirs = self
            .services
            .iter()
            .map(|s| s.dir.as_str())
            .chain(self.install.dirs.iter().map(|d| d.as_str()))
            .chain(self.build.iter().map(|b| b.dir.as_str()))
            .chain(self.checks.iter().map(|c| c.dir.as_str()));
        for dir in dirs {
            if Path::new(dir).is_absolute() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "absolute path '{dir}' ties the config to one machine; use a path \
                         relative to the project root"
                    ),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
