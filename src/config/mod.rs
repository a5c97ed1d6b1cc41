//! Harvester configuration
//!
//! Defaults, then an optional TOML file, then command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::adapters::github::{DEFAULT_MAX_PAGES, GITHUB_API_URL, MAX_PAGE_SIZE};
use crate::auth::DEFAULT_TOKEN_ENV;
use crate::error::{FeedError, Result};
use crate::types::TopicMatch;

/// Default topic label marking a repository as a portfolio project
pub const DEFAULT_TOPIC: &str = "portfolio";

/// Default snapshot location, relative to the site root
pub const DEFAULT_OUTPUT_PATH: &str = "public/projects.json";

/// Harvester configuration (portfolio.toml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Account whose repositories are listed
    pub account: String,

    /// Topic label selecting portfolio projects
    pub topic: String,

    /// How `topic` is compared against repository topics
    pub topic_match: TopicMatch,

    /// Snapshot file overwritten on each run
    pub output_path: PathBuf,

    /// REST API base URL
    pub api_url: String,

    /// Repositories requested per page
    pub per_page: u32,

    /// Upper bound on pages walked
    pub max_pages: u32,

    /// Keep forked repositories
    pub include_forks: bool,

    /// Environment variable holding the API token
    pub token_env: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            account: String::new(),
            topic: DEFAULT_TOPIC.to_string(),
            topic_match: TopicMatch::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            api_url: GITHUB_API_URL.to_string(),
            per_page: MAX_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            include_forks: false,
            token_env: DEFAULT_TOKEN_ENV.to_string(),
        }
    }
}

impl HarvestConfig {
    /// Config for `account` with every other field defaulted
    pub fn for_account(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            ..Self::default()
        }
    }

    /// Parse config from TOML text; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load config from a TOML file
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&contents)
    }

    /// Reject configurations the harvester cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.account.trim().is_empty() {
            return Err(FeedError::ConfigError("account must not be empty".to_string()));
        }
        if self.topic.trim().is_empty() {
            return Err(FeedError::ConfigError("topic must not be empty".to_string()));
        }
        if self.per_page == 0 || self.per_page > MAX_PAGE_SIZE {
            return Err(FeedError::ConfigError(format!(
                "per_page must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.per_page
            )));
        }
        if self.max_pages == 0 {
            return Err(FeedError::ConfigError("max_pages must be at least 1".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(FeedError::ConfigError("output_path must not be empty".to_string()));
        }
        Ok(())
    }
}
