use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use streakmap_core::errors::{DatabaseError, Error};
use streakmap_core::progress::{DateRange, Page, Progress, ProgressFilter, ProgressRepositoryTrait};
use streakmap_core::Result;

use super::model::ProgressDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::progress;

/// Progress store. The unique index on (goal_id, tracked_date) is the final
/// guard against two entries for the same day; a violation surfaces as
/// `DatabaseError::UniqueViolation`.
pub struct ProgressRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProgressRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProgressRepository { pool, writer }
    }
}

fn into_domain(rows: Vec<ProgressDB>) -> Vec<Progress> {
    rows.into_iter().map(Progress::from).collect()
}

#[async_trait]
impl ProgressRepositoryTrait for ProgressRepository {
    fn get_progress(&self, progress_id: &str, user_id: &str) -> Result<Option<Progress>> {
        let mut conn = get_connection(&self.pool)?;
        let row = progress::table
            .filter(progress::id.eq(progress_id))
            .filter(progress::user_id.eq(user_id))
            .select(ProgressDB::as_select())
            .first::<ProgressDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Progress::from))
    }

    fn find_progress_on_date(
        &self,
        goal_id: &str,
        user_id: &str,
        date: NaiveDate,
        exclude_id: Option<&str>,
    ) -> Result<Option<Progress>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = progress::table
            .filter(progress::goal_id.eq(goal_id))
            .filter(progress::user_id.eq(user_id))
            .filter(progress::tracked_date.eq(date))
            .select(ProgressDB::as_select())
            .into_boxed();
        if let Some(exclude_id) = exclude_id {
            query = query.filter(progress::id.ne(exclude_id));
        }
        let row = query
            .first::<ProgressDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Progress::from))
    }

    fn search_progress(
        &self,
        user_id: &str,
        filter: &ProgressFilter,
        page: Page,
    ) -> Result<Vec<Progress>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = progress::table
            .filter(progress::user_id.eq(user_id))
            .select(ProgressDB::as_select())
            .into_boxed();
        if let Some(goal_id) = filter.goal_id.as_deref() {
            query = query.filter(progress::goal_id.eq(goal_id));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(progress::tracked_date.ge(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(progress::tracked_date.le(end));
        }
        let rows = query
            .order((progress::tracked_date.desc(), progress::created_at.desc()))
            .limit(page.limit)
            .offset(page.offset())
            .load::<ProgressDB>(&mut conn)
            .into_core()?;
        Ok(into_domain(rows))
    }

    fn get_progress_in_range(
        &self,
        user_id: &str,
        goal_id: Option<&str>,
        range: DateRange,
    ) -> Result<Vec<Progress>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = progress::table
            .filter(progress::user_id.eq(user_id))
            .filter(progress::tracked_date.between(range.start, range.end))
            .select(ProgressDB::as_select())
            .into_boxed();
        if let Some(goal_id) = goal_id {
            query = query.filter(progress::goal_id.eq(goal_id));
        }
        let rows = query
            .order((progress::tracked_date.asc(), progress::created_at.asc()))
            .load::<ProgressDB>(&mut conn)
            .into_core()?;
        Ok(into_domain(rows))
    }

    async fn insert_progress(&self, entry: Progress) -> Result<Progress> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Progress> {
                let row = diesel::insert_into(progress::table)
                    .values(ProgressDB::from(entry))
                    .returning(ProgressDB::as_returning())
                    .get_result(conn)
                    .into_core()
                    .inspect_err(|e| {
                        if e.is_unique_violation() {
                            debug!("Unique index rejected progress insert: {}", e);
                        }
                    })?;
                Ok(Progress::from(row))
            })
            .await
    }

    async fn update_progress(&self, entry: Progress) -> Result<Progress> {
        let row = ProgressDB::from(entry);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Progress> {
                let updated = diesel::update(
                    progress::table
                        .filter(progress::id.eq(&row.id))
                        .filter(progress::user_id.eq(&row.user_id)),
                )
                .set(&row)
                .returning(ProgressDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(format!(
                        "Progress entry {} not found",
                        row.id
                    )))
                })?;
                Ok(Progress::from(updated))
            })
            .await
    }

    async fn delete_progress(&self, progress_id: String, user_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    progress::table
                        .filter(progress::id.eq(progress_id))
                        .filter(progress::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
