//! StaticSource - in-memory repository listing
//!
//! Serves a fixed set of repositories, optionally loaded from a saved API
//! response dump (a JSON array of repository objects). Used for offline
//! harvests and as the source double in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

use super::{RepoSource, SourceError, SourceRepo, SourceResult};

/// In-memory repository listing keyed by account
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    /// account -> repositories in listing order
    repos: HashMap<String, Vec<SourceRepo>>,
    /// Listing returned for accounts not registered above
    fallback: Option<Vec<SourceRepo>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the repositories listed for `account`
    pub fn with_account(mut self, account: impl Into<String>, repos: Vec<SourceRepo>) -> Self {
        self.repos.insert(account.into(), repos);
        self
    }

    /// Serve `repos` for any account (API dumps carry no owner context)
    pub fn for_any_account(repos: Vec<SourceRepo>) -> Self {
        Self {
            repos: HashMap::new(),
            fallback: Some(repos),
        }
    }

    /// Load a saved listing response from disk
    pub async fn from_dump(path: &Path) -> SourceResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let repos: Vec<SourceRepo> = serde_json::from_str(&content)
            .map_err(|e| SourceError::SerdeError(format!("{}: {e}", path.display())))?;
        Ok(Self::for_any_account(repos))
    }
}

#[async_trait]
impl RepoSource for StaticSource {
    async fn list_repos(&self, account: &str) -> SourceResult<Vec<SourceRepo>> {
        self.repos
            .get(account)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| SourceError::AccountNotFound {
                account: account.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
