//! Storage layer: claim snapshots as JSON files.

mod error;
pub use error::StoreError;

mod snapshot;
pub use snapshot::SnapshotFile;
