//! Snapshot loading for the presenter
//!
//! The snapshot is either read from disk or fetched over HTTP from the
//! fixed relative path it is published under next to the page.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::storage::{parse_snapshot, SNAPSHOT_FILE_NAME};
use crate::types::RepositorySummary;

/// Errors that can occur while loading the snapshot
#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered with a non-success status
    #[error("snapshot request returned HTTP {status}")]
    Status { status: u16 },

    /// The body is not a valid snapshot
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Local file could not be read
    #[error("could not read snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// The location string is neither a path nor a usable URL
    #[error("invalid snapshot location: {0}")]
    Location(String),
}

/// Where the snapshot lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotLocation {
    /// Snapshot file, or a directory containing `projects.json`
    File(PathBuf),
    /// Full URL of the served snapshot
    Url(Url),
}

impl SnapshotLocation {
    /// Interpret `value` as an `http(s)://` URL or a filesystem path.
    ///
    /// A URL that does not name a `.json` file is treated as the site base
    /// and `projects.json` is resolved against it.
    pub fn parse(value: &str) -> Result<Self, LoadError> {
        if value.starts_with("http://") || value.starts_with("https://") {
            let mut url = Url::parse(value).map_err(|e| LoadError::Location(e.to_string()))?;
            if !url.path().ends_with(".json") {
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                url = url
                    .join(SNAPSHOT_FILE_NAME)
                    .map_err(|e| LoadError::Location(e.to_string()))?;
            }
            return Ok(SnapshotLocation::Url(url));
        }

        if value.trim().is_empty() {
            return Err(LoadError::Location("empty location".to_string()));
        }
        Ok(SnapshotLocation::File(PathBuf::from(value)))
    }
}

/// Source of snapshot records
#[async_trait]
pub trait SnapshotFetch: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RepositorySummary>, LoadError>;
}

/// Loads the snapshot from a [`SnapshotLocation`]
pub struct SnapshotLoader {
    client: Client,
    location: SnapshotLocation,
}

fn build_client(timeout: Option<Duration>) -> Result<Client, LoadError> {
    let mut builder =
        Client::builder().user_agent(concat!("portfolio-feed/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| LoadError::Network(e.to_string()))
}

impl SnapshotLoader {
    /// Loader using the transport's default timeouts
    pub fn new(location: SnapshotLocation) -> Result<Self, LoadError> {
        Ok(Self {
            client: build_client(None)?,
            location,
        })
    }

    /// Bound each HTTP request to `timeout`; file reads are unaffected
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LoadError> {
        self.client = build_client(Some(timeout))?;
        Ok(self)
    }

    pub fn location(&self) -> &SnapshotLocation {
        &self.location
    }

    async fn fetch_url(&self, url: &Url) -> Result<Vec<RepositorySummary>, LoadError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status { status: status.as_u16() });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(parse_snapshot(&body)?)
    }

    async fn fetch_file(&self, path: &Path) -> Result<Vec<RepositorySummary>, LoadError> {
        let path = if tokio::fs::metadata(path).await?.is_dir() {
            path.join(SNAPSHOT_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let body = tokio::fs::read(&path).await?;
        Ok(parse_snapshot(&body)?)
    }
}

#[async_trait]
impl SnapshotFetch for SnapshotLoader {
    async fn fetch(&self) -> Result<Vec<RepositorySummary>, LoadError> {
        let records = match &self.location {
            SnapshotLocation::Url(url) => self.fetch_url(url).await?,
            SnapshotLocation::File(path) => self.fetch_file(path).await?,
        };
        debug!(count = records.len(), "loaded snapshot");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url() {
        let location = SnapshotLocation::parse("https://someone.github.io/Portfolio").unwrap();
        assert_eq!(
            location,
            SnapshotLocation::Url(
                Url::parse("https://someone.github.io/Portfolio/projects.json").unwrap()
            )
        );

        let location = SnapshotLocation::parse("https://someone.github.io/Portfolio/").unwrap();
        assert_eq!(
            location,
            SnapshotLocation::Url(
                Url::parse("https://someone.github.io/Portfolio/projects.json").unwrap()
            )
        );
    }

    #[test]
    fn test_parse_full_url() {
        let location = SnapshotLocation::parse("http://localhost:8080/data/feed.json").unwrap();
        assert_eq!(
            location,
            SnapshotLocation::Url(Url::parse("http://localhost:8080/data/feed.json").unwrap())
        );
    }

    #[test]
    fn test_parse_path() {
        let location = SnapshotLocation::parse("public/projects.json").unwrap();
        assert_eq!(location, SnapshotLocation::File(PathBuf::from("public/projects.json")));
        assert!(matches!(SnapshotLocation::parse(""), Err(LoadError::Location(_))));
        assert!(matches!(SnapshotLocation::parse("http://"), Err(LoadError::Location(_))));
    }

    #[tokio::test]
    async fn test_fetch_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE_NAME);
        tokio::fs::write(&path, "[]").await.unwrap();

        let loader = SnapshotLoader::new(SnapshotLocation::File(path)).unwrap();
        assert!(loader.fetch().await.unwrap().is_empty());

        let loader = SnapshotLoader::new(SnapshotLocation::File(dir.path().to_path_buf())).unwrap();
        assert!(loader.fetch().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader =
            SnapshotLoader::new(SnapshotLocation::File(dir.path().join("absent.json"))).unwrap();
        assert!(matches!(loader.fetch().await, Err(LoadError::Io(_))));
    }

    #[tokio::test]
    async fn test_fetch_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE_NAME);
        tokio::fs::write(&path, "[{").await.unwrap();

        let loader = SnapshotLoader::new(SnapshotLocation::File(path)).unwrap();
        assert!(matches!(loader.fetch().await, Err(LoadError::Parse(_))));
    }
}
