use thiserror::Error;

/// Unified error type for np operations
#[derive(Error, Debug)]
pub enum NpError {
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Pre-release number not specified for tag '{0}'")]
    MissingPreReleaseNumber(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Preflight check failed: {0}")]
    Preflight(String),

    #[error("Command `{command}` failed with exit code {code}: {output}")]
    Command {
        command: String,
        code: i32,
        output: String,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

/// Convenience type alias for Results in np
pub type Result<T> = std::result::Result<T, NpError>;

impl NpError {
    /// Create an invalid version error with context
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        NpError::InvalidVersion(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        NpError::Config(msg.into())
    }

    /// Create a settings error with context
    pub fn settings(msg: impl Into<String>) -> Self {
        NpError::Settings(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        NpError::Manifest(msg.into())
    }

    /// Create a preflight error with context
    pub fn preflight(msg: impl Into<String>) -> Self {
        NpError::Preflight(msg.into())
    }

    /// Create a failed-subprocess error
    pub fn command(command: impl Into<String>, code: i32, output: impl Into<String>) -> Self {
        NpError::Command {
            command: command.into(),
            code,
            output: output.into(),
        }
    }
}
