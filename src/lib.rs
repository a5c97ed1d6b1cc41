//! portfolio-feed - portfolio project feed
//!
//! The harvester lists an account's repositories, keeps those tagged with the
//! portfolio topic and writes them to a JSON snapshot. The presenter loads
//! that snapshot and derives searchable, filterable, sortable views of it.

pub mod adapters;
pub mod auth;
pub mod config;
pub mod error;
pub mod harvest;
pub mod presenter;
pub mod storage;
pub mod types;

// Re-exports for convenience
pub use adapters::{GitHubAdapter, RepoSource, SourceError, StaticSource};
pub use config::HarvestConfig;
pub use error::{FeedError, Result};
pub use harvest::Harvester;
pub use presenter::{LoadState, Presenter, SortKey, TagFilter, ViewState};
pub use types::*;
