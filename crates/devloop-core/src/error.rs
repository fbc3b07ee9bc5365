use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevloopError {
    #[error("not initialized: run 'devloop init'")]
    NotInitialized,

    #[error("'{0}' is not installed or not on PATH")]
    MissingTool(String),

    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("unknown service: {0}")]
    ServiceNotFound(String),

    #[error("invalid service name '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidServiceName(String),

    #[error("command failed with exit code {code}: {command}")]
    StepFailed { command: String, code: i32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DevloopError>;
