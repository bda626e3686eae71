//! Snapshot persistence used by the plan and session stores.
//!
//! A snapshot is one JSON document stored under a fixed key. Writers always
//! replace the whole document; there is no append log and no versioning.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod snapshot;

pub use memory::InMemoryRepository;

pub trait SnapshotReader {
    /// Returns the raw JSON stored under `key`, if any.
    fn load_snapshot(&self, key: &str) -> RepositoryResult<Option<String>>;
}

pub trait SnapshotWriter {
    /// Overwrites the document stored under `key`.
    fn save_snapshot(&self, key: &str, value: &str) -> RepositoryResult<()>;
    fn delete_snapshot(&self, key: &str) -> RepositoryResult<()>;
}

/// Diesel-backed repository storing snapshots in sqlite.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
