use thiserror::Error;

use crate::adapters::SourceError;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Snapshot write failed: {0}")]
    PersistError(#[from] tempfile::PersistError),
}

impl FeedError {
    /// Whether this error came from a rejected or missing token
    pub fn is_authentication(&self) -> bool {
        matches!(self, FeedError::Source(SourceError::AuthenticationFailed { .. }))
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
