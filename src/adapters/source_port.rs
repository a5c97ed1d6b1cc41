//! RepoSource trait - unified interface for listing an account's repositories
//!
//! Implemented by the GitHub REST adapter and by the in-memory static source
//! used for offline harvests and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to a repository source
#[derive(Debug, Error)]
pub enum SourceError {
    /// Token missing, invalid or expired
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// The account does not exist on the hosting platform
    #[error("Account not found: {account}")]
    AccountNotFound { account: String },

    /// The API refused the request because the rate limit is exhausted
    #[error("Rate limited by API (limit resets at {reset})")]
    RateLimited { reset: String },

    /// Network/connection error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Non-success HTTP status not covered above
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// I/O error (static source dump files)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    SerdeError(String),
}

/// Result type for source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Repository record as returned by the hosting API.
///
/// Only the fields the harvester projects are kept; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub fork: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unified interface for repository listing
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// List every repository owned by `account`, in source order
    async fn list_repos(&self, account: &str) -> SourceResult<Vec<SourceRepo>>;

    /// Short name used in log lines
    fn name(&self) -> &'static str;
}
