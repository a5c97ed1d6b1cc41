pub mod snapshot;

pub use snapshot::{parse_snapshot, read_snapshot, write_snapshot, SNAPSHOT_FILE_NAME};
