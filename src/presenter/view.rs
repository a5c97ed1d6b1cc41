//! Pure view derivation over a loaded snapshot
//!
//! Every function here is side-effect free. The presenter re-invokes them on
//! each state change instead of patching a cached view.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::types::RepositorySummary;

/// Display label of the sentinel entry that disables tag filtering
pub const ALL_TAGS: &str = "All";

/// Active tag filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TagFilter {
    /// No tag filtering (the "All" sentinel)
    #[default]
    All,
    /// Keep records whose topics contain this tag exactly
    Tag(String),
}

impl TagFilter {
    /// `"All"` maps to the sentinel, anything else to a tag
    pub fn parse(value: &str) -> Self {
        if value == ALL_TAGS {
            TagFilter::All
        } else {
            TagFilter::Tag(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagFilter::All => ALL_TAGS,
            TagFilter::Tag(tag) => tag,
        }
    }

    fn admits(&self, record: &RepositorySummary) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => record.has_topic(tag),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TagFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Ordering applied to the filtered records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Most recently updated first
    #[default]
    Updated,
    /// Most starred first
    Stars,
    /// Name, ascending
    Name,
}

impl SortKey {
    /// Lenient parse: unknown keys fall back to the default ordering
    pub fn parse(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            debug!(value, "unknown sort key, using default");
            SortKey::default()
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Updated => "updated",
            SortKey::Stars => "stars",
            SortKey::Name => "name",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "updated" => Ok(SortKey::Updated),
            "stars" => Ok(SortKey::Stars),
            "name" => Ok(SortKey::Name),
            other => Err(format!(
                "unknown sort key '{other}' (expected updated, stars or name)"
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interactive query state, passed explicitly to the view functions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub search_term: String,
    pub active_tag: TagFilter,
    pub sort_key: SortKey,
}

impl ViewState {
    /// Derive the visible records for this state
    pub fn apply(&self, records: &[RepositorySummary]) -> Vec<RepositorySummary> {
        apply_view(records, &self.search_term, &self.active_tag, self.sort_key)
    }
}

/// Distinct tags in first-seen order, prefixed by the `"All"` sentinel.
///
/// A literal `"All"` topic collapses into the sentinel.
pub fn derive_tag_index(records: &[RepositorySummary]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::from([ALL_TAGS]);
    let mut index = vec![ALL_TAGS.to_string()];

    for tag in records.iter().flat_map(|r| r.topics.iter()) {
        if seen.insert(tag.as_str()) {
            index.push(tag.clone());
        }
    }

    index
}

/// Filter by search term and tag, then sort.
///
/// The search is a case-insensitive substring match over name, description
/// and topics and is skipped when `search_term` is empty. Sorting is stable,
/// so records with equal keys keep their input order.
pub fn apply_view(
    records: &[RepositorySummary],
    search_term: &str,
    active_tag: &TagFilter,
    sort_key: SortKey,
) -> Vec<RepositorySummary> {
    let needle = search_term.to_lowercase();

    let mut view: Vec<RepositorySummary> = records
        .iter()
        .filter(|r| needle.is_empty() || r.matches_lowercase(&needle))
        .filter(|r| active_tag.admits(r))
        .cloned()
        .collect();

    match sort_key {
        SortKey::Stars => view.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count)),
        SortKey::Name => view.sort_by(|a, b| a.name.cmp(&b.name)),
        // None orders below Some, so undated records sink to the end
        SortKey::Updated => view.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }

    view
}

/// The record with the latest `updated_at`; the first one wins on ties.
/// Records without a timestamp are ignored.
pub fn most_recently_updated(records: &[RepositorySummary]) -> Option<&RepositorySummary> {
    records
        .iter()
        .filter(|r| r.updated_at.is_some())
        .reduce(|latest, r| if r.updated_at > latest.updated_at { r } else { latest })
}
