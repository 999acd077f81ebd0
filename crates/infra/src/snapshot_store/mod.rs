//! Byte-level storage for a single persisted record.

mod file;
mod in_memory;

pub use file::FileSnapshotStore;
pub use in_memory::InMemorySnapshotStore;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A writer panicked while holding the in-memory blob.
    #[error("snapshot store lock poisoned")]
    Poisoned,
}

/// Holds at most one blob; `write` replaces it wholesale.
pub trait SnapshotStore: Send + Sync {
    /// `Ok(None)` when nothing has been written yet.
    fn read(&self) -> Result<Option<Vec<u8>>, PersistenceError>;
    fn write(&self, bytes: &[u8]) -> Result<(), PersistenceError>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn read(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        (**self).read()
    }

    fn write(&self, bytes: &[u8]) -> Result<(), PersistenceError> {
        (**self).write(bytes)
    }
}
