//! Core types for portfolio-feed

pub mod summary;

use serde::{Deserialize, Serialize};

pub use summary::RepositorySummary;

/// How the designated topic label is compared against a repository's topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicMatch {
    /// ASCII case-insensitive comparison (`Portfolio` matches `portfolio`)
    #[default]
    IgnoreCase,
    /// Exact, case-sensitive membership
    Exact,
}

impl TopicMatch {
    /// Whether `topic` matches `label` under this rule
    pub fn matches(self, topic: &str, label: &str) -> bool {
        match self {
            TopicMatch::IgnoreCase => topic.eq_ignore_ascii_case(label),
            TopicMatch::Exact => topic == label,
        }
    }

    /// Whether any of `topics` matches `label`
    pub fn any_matches<S: AsRef<str>>(self, topics: &[S], label: &str) -> bool {
        topics.iter().any(|t| self.matches(t.as_ref(), label))
    }
}
