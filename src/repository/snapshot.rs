use chrono::Utc;
use diesel::prelude::*;

use crate::models::snapshot::{NewSnapshot, Snapshot};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, SnapshotReader, SnapshotWriter};
use crate::schema::snapshots;

impl SnapshotReader for DieselRepository {
    fn load_snapshot(&self, key: &str) -> RepositoryResult<Option<String>> {
        let mut conn = self.conn()?;

        let row = snapshots::table
            .filter(snapshots::key.eq(key))
            .select(Snapshot::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(|snapshot| snapshot.value))
    }
}

impl SnapshotWriter for DieselRepository {
    fn save_snapshot(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let row = NewSnapshot {
            key,
            value,
            updated_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(snapshots::table)
            .values(&row)
            .on_conflict(snapshots::key)
            .do_update()
            .set((
                snapshots::value.eq(row.value),
                snapshots::updated_at.eq(row.updated_at),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn delete_snapshot(&self, key: &str) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        diesel::delete(snapshots::table.filter(snapshots::key.eq(key))).execute(&mut conn)?;

        Ok(())
    }
}
