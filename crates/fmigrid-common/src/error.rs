use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FmigridError {
    #[error("Cannot read file {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FmigridError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, FmigridError>;
