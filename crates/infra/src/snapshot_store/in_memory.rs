use std::sync::RwLock;

use super::{PersistenceError, SnapshotStore};

/// In-memory blob for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    inner: RwLock<Option<Vec<u8>>>,
    writes: RwLock<usize>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: RwLock::new(Some(bytes.into())),
            writes: RwLock::new(0),
        }
    }

    /// Current blob, if any.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.inner.read().ok()?.clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|w| *w).unwrap_or(0)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        let blob = self.inner.read().map_err(|_| PersistenceError::Poisoned)?;
        Ok(blob.clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<(), PersistenceError> {
        let mut blob = self.inner.write().map_err(|_| PersistenceError::Poisoned)?;
        let mut writes = self.writes.write().map_err(|_| PersistenceError::Poisoned)?;
        *blob = Some(bytes.to_vec());
        *writes += 1;
        Ok(())
    }
}
