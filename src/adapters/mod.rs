//! Repository source adapters implementing the RepoSource trait

pub mod github;
pub mod source_port;
pub mod static_source;

pub use github::GitHubAdapter;
pub use source_port::{RepoSource, SourceError, SourceRepo, SourceResult};
pub use static_source::StaticSource;
