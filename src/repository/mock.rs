//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::repository::errors::RepositoryResult;
use crate::repository::{SnapshotReader, SnapshotWriter};

mock! {
    pub Repository {}

    impl SnapshotReader for Repository {
        fn load_snapshot(&self, key: &str) -> RepositoryResult<Option<String>>;
    }

    impl SnapshotWriter for Repository {
        fn save_snapshot(&self, key: &str, value: &str) -> RepositoryResult<()>;
        fn delete_snapshot(&self, key: &str) -> RepositoryResult<()>;
    }
}
