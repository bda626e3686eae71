use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::snapshots)]
/// Stored JSON document for one snapshot key.
pub struct Snapshot {
    pub key: String,
    pub value: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::snapshots)]
/// Insertable form of [`Snapshot`].
pub struct NewSnapshot<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub updated_at: NaiveDateTime,
}
