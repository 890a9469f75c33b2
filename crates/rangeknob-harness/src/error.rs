use std::path::PathBuf;

use rangeknob_core::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid slider configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("trace file does not exist: {path}")]
    MissingTrace { path: PathBuf },

    #[error("unknown scenario: {name} (try `scenario --list`)")]
    UnknownScenario { name: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("logging setup failed: {message}")]
    Logging { message: String },

    #[error("check failed: {failed} violation(s)")]
    CheckFailed { failed: usize },
}

impl HarnessError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CheckFailed { .. } => 2,
            Self::InvalidArgument { .. } | Self::UnknownScenario { .. } => 64,
            Self::Json(_) | Self::Config(_) => 65,
            Self::Io(_) | Self::MissingTrace { .. } => 74,
            Self::Logging { .. } => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
