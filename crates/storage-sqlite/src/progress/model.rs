//! Database model for progress entries.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use streakmap_core::progress::Progress;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::progress)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDB {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub value: f64,
    pub completion_rate: f64,
    pub notes: Option<String>,
    pub tracked_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ProgressDB> for Progress {
    fn from(db: ProgressDB) -> Self {
        Self {
            id: db.id,
            goal_id: db.goal_id,
            user_id: db.user_id,
            value: db.value,
            completion_rate: db.completion_rate,
            notes: db.notes,
            tracked_date: db.tracked_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Progress> for ProgressDB {
    fn from(domain: Progress) -> Self {
        Self {
            id: domain.id,
            goal_id: domain.goal_id,
            user_id: domain.user_id,
            value: domain.value,
            completion_rate: domain.completion_rate,
            notes: domain.notes,
            tracked_date: domain.tracked_date,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
