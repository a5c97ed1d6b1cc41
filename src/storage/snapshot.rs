use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{FeedError, Result};
use crate::types::RepositorySummary;

/// File name the snapshot is published under, next to the page
pub const SNAPSHOT_FILE_NAME: &str = "projects.json";

/// Decode a snapshot body
pub fn parse_snapshot(bytes: &[u8]) -> serde_json::Result<Vec<RepositorySummary>> {
    serde_json::from_slice(bytes)
}

/// Read and decode the snapshot at `path`
pub async fn read_snapshot(path: &Path) -> Result<Vec<RepositorySummary>> {
    let bytes = tokio::fs::read(path).await?;
    Ok(parse_snapshot(&bytes)?)
}

/// Replace the snapshot at `path` with `records`, pretty-printed.
///
/// The body goes to a temp file in the destination directory which is then
/// renamed over `path`, so readers see either the old or the new snapshot.
pub async fn write_snapshot(path: &Path, records: &[RepositorySummary]) -> Result<()> {
    let mut body = serde_json::to_vec_pretty(records)?;
    body.push(b'\n');

    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || persist(&path, &body))
        .await
        .map_err(|e| FeedError::StorageError(std::io::Error::other(e)))?
}

fn persist(path: &Path, body: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(body)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
