//! Repository summary records, the unit of the snapshot file

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One portfolio project as written to (and read from) the snapshot file.
///
/// Field names follow the GitHub REST schema so the snapshot stays readable
/// next to raw API output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Opaque id assigned by the hosting API (0 in minimal snapshots)
    #[serde(default)]
    pub id: u64,

    /// Repository name (without owner prefix)
    pub name: String,

    /// Repository description
    pub description: Option<String>,

    /// Repository home page on the hosting platform
    pub html_url: String,

    /// External project site
    pub homepage: Option<String>,

    /// Primary language label
    pub language: Option<String>,

    #[serde(default)]
    pub stargazers_count: u64,

    // Snapshots written by the minimal harvester omit these.
    #[serde(default)]
    pub forks_count: u64,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepositorySummary {
    /// Create a summary with the given id and name and no timestamps
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            html_url: String::new(),
            name: name.into(),
            description: None,
            homepage: None,
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            topics: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the repository URL
    pub fn with_html_url(mut self, url: impl Into<String>) -> Self {
        self.html_url = url.into();
        self
    }

    /// Set the primary language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the star count
    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stargazers_count = stars;
        self
    }

    /// Replace the topic list
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Set creation and last-update timestamps
    pub fn with_timestamps(
        mut self,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
        self
    }

    /// Whether the topic list contains `tag` exactly
    pub fn has_topic(&self, tag: &str) -> bool {
        self.topics.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match against name, description and topics.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self.topics.iter().any(|t| t.to_lowercase().contains(needle))
    }
}
