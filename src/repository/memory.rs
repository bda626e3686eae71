//! In-memory snapshot storage, used by tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{SnapshotReader, SnapshotWriter};

/// Clones share the same underlying map, so a store and a test can both
/// observe what was written.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    snapshots: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E>(_: E) -> RepositoryError {
    RepositoryError::Unexpected("snapshot map lock poisoned".to_string())
}

impl SnapshotReader for InMemoryRepository {
    fn load_snapshot(&self, key: &str) -> RepositoryResult<Option<String>> {
        let map = self.snapshots.read().map_err(poisoned)?;
        Ok(map.get(key).cloned())
    }
}

impl SnapshotWriter for InMemoryRepository {
    fn save_snapshot(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let mut map = self.snapshots.write().map_err(poisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_snapshot(&self, key: &str) -> RepositoryResult<()> {
        let mut map = self.snapshots.write().map_err(poisoned)?;
        map.remove(key);
        Ok(())
    }
}
