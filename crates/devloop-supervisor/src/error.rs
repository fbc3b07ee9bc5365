use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("failed to launch '{name}': {reason}")]
    Launch { name: String, reason: String },

    #[error("a service named '{0}' is already registered")]
    DuplicateName(String),

    #[error(
        "service '{name}' exited unexpectedly ({})",
        .exit_code.map_or_else(|| "terminated by signal".to_owned(), |c| format!("code {c}"))
    )]
    UnexpectedExit {
        name: String,
        exit_code: Option<i32>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SupervisorError>;
