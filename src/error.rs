use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("unsupported build shape: {0}")]
    UnsupportedBuildShape(String),
    #[error("build server error: {0}")]
    BuildServer(String),
    #[error("notifier error: {0}")]
    Notifier(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
