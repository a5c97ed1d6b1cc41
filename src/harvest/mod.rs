//! Harvester - snapshot portfolio-tagged repositories to a JSON file
//!
//! One run lists every repository of an account, keeps those carrying the
//! topic label, projects them to [`RepositorySummary`] and overwrites the
//! snapshot file. Any source failure aborts the run before the file is
//! touched, so a failed harvest leaves the previous snapshot in place.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::adapters::{RepoSource, SourceRepo};
use crate::config::HarvestConfig;
use crate::error::{FeedError, Result};
use crate::storage::write_snapshot;
use crate::types::{RepositorySummary, TopicMatch};

/// Fetch-filter-write pipeline over a [`RepoSource`]
pub struct Harvester {
    source: Arc<dyn RepoSource>,
    topic_match: TopicMatch,
    include_forks: bool,
}

impl Harvester {
    /// Harvester with default rules: case-insensitive topic match, forks skipped
    pub fn new(source: Arc<dyn RepoSource>) -> Self {
        Self {
            source,
            topic_match: TopicMatch::default(),
            include_forks: false,
        }
    }

    /// Harvester using the selection rules of `config`
    pub fn from_config(source: Arc<dyn RepoSource>, config: &HarvestConfig) -> Self {
        Self::new(source)
            .with_topic_match(config.topic_match)
            .with_forks(config.include_forks)
    }

    pub fn with_topic_match(mut self, topic_match: TopicMatch) -> Self {
        self.topic_match = topic_match;
        self
    }

    pub fn with_forks(mut self, include_forks: bool) -> Self {
        self.include_forks = include_forks;
        self
    }

    /// List and select repositories without writing anything
    pub async fn collect(&self, account: &str, topic: &str) -> Result<Vec<RepositorySummary>> {
        if account.trim().is_empty() {
            return Err(FeedError::ConfigError("account must not be empty".to_string()));
        }
        if topic.trim().is_empty() {
            return Err(FeedError::ConfigError("topic must not be empty".to_string()));
        }

        let repos = self.source.list_repos(account).await?;
        info!(
            source = self.source.name(),
            account,
            listed = repos.len(),
            "listed repositories"
        );

        Ok(select(repos, topic, self.topic_match, self.include_forks))
    }

    /// Run one harvest and return the number of records written
    pub async fn harvest(&self, account: &str, topic: &str, output_path: &Path) -> Result<usize> {
        let records = self.collect(account, topic).await?;
        write_snapshot(output_path, &records).await?;

        info!(
            count = records.len(),
            path = %output_path.display(),
            "wrote snapshot"
        );
        Ok(records.len())
    }
}

/// Keep tagged, non-fork (unless allowed) repositories, first occurrence of
/// each id only, and project them in source order.
pub fn select(
    repos: Vec<SourceRepo>,
    topic: &str,
    topic_match: TopicMatch,
    include_forks: bool,
) -> Vec<RepositorySummary> {
    let mut seen = HashSet::new();

    repos
        .into_iter()
        .filter(|repo| {
            if repo.fork && !include_forks {
                debug!(name = %repo.name, "skipping fork");
                return false;
            }
            topic_match.any_matches(&repo.topics, topic)
        })
        .filter(|repo| {
            let fresh = seen.insert(repo.id);
            if !fresh {
                debug!(id = repo.id, name = %repo.name, "dropping duplicate listing entry");
            }
            fresh
        })
        .map(project)
        .collect()
}

fn project(repo: SourceRepo) -> RepositorySummary {
    if repo.updated_at < repo.created_at {
        warn!(name = %repo.name, "updated_at precedes created_at");
    }

    RepositorySummary {
        id: repo.id,
        name: repo.name,
        description: repo.description,
        html_url: repo.html_url,
        homepage: repo.homepage,
        language: repo.language,
        stargazers_count: repo.stargazers_count,
        forks_count: repo.forks_count,
        topics: repo.topics,
        created_at: Some(repo.created_at),
        updated_at: Some(repo.updated_at),
    }
}
