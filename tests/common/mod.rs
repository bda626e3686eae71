//! Shared helpers for integration tests.

use barbershop_booking::db::{DbPool, establish_connection_pool, run_migrations};
use tempfile::TempDir;

/// SQLite database in a temporary directory, migrated on creation and
/// removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 temp path").to_string();
        let pool = establish_connection_pool(&url).expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
