//! Presenter - load the snapshot and derive interactive views of it
//!
//! Lifecycle per session: `Idle -> Loading -> Ready | Failed`. Query state
//! (search term, tag, sort key) lives in an explicit [`ViewState`]; the
//! visible list is recomputed from it on every call.

pub mod loader;
pub mod view;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::types::RepositorySummary;

pub use loader::{LoadError, SnapshotFetch, SnapshotLoader, SnapshotLocation};
pub use view::{
    apply_view, derive_tag_index, most_recently_updated, SortKey, TagFilter, ViewState, ALL_TAGS,
};

/// Remediation shown with a failed load
pub const LOAD_FAILURE_HINT: &str =
    "The projects file may not exist yet. Run portfolio-harvest to generate it.";

/// Snapshot load state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    /// Loaded; an empty list is a valid result
    Ready(Vec<RepositorySummary>),
    /// User-facing failure message
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}

/// Session state for the projects view
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    state: LoadState,
    view: ViewState,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presenter starting from the given query state
    pub fn with_view(view: ViewState) -> Self {
        Self {
            state: LoadState::Idle,
            view,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Enter `Loading`. Previously loaded records are dropped.
    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Leave `Loading` with the outcome of a fetch
    pub fn finish_load(&mut self, outcome: Result<Vec<RepositorySummary>, LoadError>) {
        self.state = match outcome {
            Ok(records) => {
                info!(count = records.len(), "projects loaded");
                LoadState::Ready(records)
            }
            Err(e) => {
                warn!(error = %e, "failed to load projects");
                LoadState::Failed(format!("Failed to load repositories: {e}. {LOAD_FAILURE_HINT}"))
            }
        };
    }

    /// Fetch the snapshot once; failures become `Failed`, never retried
    pub async fn load(&mut self, source: &dyn SnapshotFetch) -> &LoadState {
        self.begin_load();
        let outcome = source.fetch().await;
        self.finish_load(outcome);
        &self.state
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.search_term = term.into();
    }

    pub fn set_active_tag(&mut self, tag: TagFilter) {
        self.view.active_tag = tag;
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.view.sort_key = key;
    }

    /// Loaded records, empty unless `Ready`
    pub fn records(&self) -> &[RepositorySummary] {
        match &self.state {
            LoadState::Ready(records) => records,
            _ => &[],
        }
    }

    /// Records visible under the current query state
    pub fn visible(&self) -> Vec<RepositorySummary> {
        self.view.apply(self.records())
    }

    /// Tag choices for the filter control, `"All"` first
    pub fn tag_index(&self) -> Vec<String> {
        derive_tag_index(self.records())
    }

    /// Latest `updated_at` across loaded records
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        most_recently_updated(self.records()).and_then(|r| r.updated_at)
    }

    /// "Showing X of Y repositories"
    pub fn summary(&self) -> String {
        let total = self.records().len();
        let noun = if total == 1 { "repository" } else { "repositories" };
        format!("Showing {} of {} {}", self.visible().len(), total, noun)
    }
}
