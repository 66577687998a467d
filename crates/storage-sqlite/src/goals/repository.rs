use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use streakmap_core::errors::{DatabaseError, Error};
use streakmap_core::goals::{Goal, GoalFilter, GoalGroup, GoalRepositoryTrait};
use streakmap_core::Result;

use super::model::{into_goals, GoalDB, GoalGroupDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{goal_groups, goals};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn not_found(what: &str, id: &str) -> Error {
    Error::Database(DatabaseError::NotFound(format!("{} {} not found", what, id)))
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goal(&self, goal_id: &str, user_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = goals::table
            .filter(goals::id.eq(goal_id))
            .filter(goals::user_id.eq(user_id))
            .select(GoalDB::as_select())
            .first::<GoalDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Goal::try_from).transpose()?)
    }

    fn list_goals(&self, user_id: &str, filter: &GoalFilter) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = goals::table
            .filter(goals::user_id.eq(user_id))
            .select(GoalDB::as_select())
            .into_boxed();
        if let Some(group_id) = filter.group_id.as_deref() {
            query = query.filter(goals::group_id.eq(group_id));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(goals::is_active.eq(is_active));
        }
        let rows = query
            .order((goals::sort_order.asc(), goals::created_at.asc()))
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        Ok(into_goals(rows)?)
    }

    async fn insert_goal(&self, goal: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let row = diesel::insert_into(goals::table)
                    .values(GoalDB::from(goal))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Goal::try_from(row)?)
            })
            .await
    }

    async fn update_goal(&self, goal: Goal) -> Result<Goal> {
        let row = GoalDB::from(goal);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let updated = diesel::update(
                    goals::table
                        .filter(goals::id.eq(&row.id))
                        .filter(goals::user_id.eq(&row.user_id)),
                )
                .set(&row)
                .returning(GoalDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?
                .ok_or_else(|| not_found("Goal", &row.id))?;
                Ok(Goal::try_from(updated)?)
            })
            .await
    }

    async fn delete_goal(&self, goal_id: String, user_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    goals::table
                        .filter(goals::id.eq(goal_id))
                        .filter(goals::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }

    fn get_group(&self, group_id: &str, user_id: &str) -> Result<Option<GoalGroup>> {
        let mut conn = get_connection(&self.pool)?;
        let row = goal_groups::table
            .filter(goal_groups::id.eq(group_id))
            .filter(goal_groups::user_id.eq(user_id))
            .select(GoalGroupDB::as_select())
            .first::<GoalGroupDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(GoalGroup::from))
    }

    fn list_groups(&self, user_id: &str) -> Result<Vec<GoalGroup>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goal_groups::table
            .filter(goal_groups::user_id.eq(user_id))
            .order((goal_groups::sort_order.asc(), goal_groups::created_at.asc()))
            .select(GoalGroupDB::as_select())
            .load::<GoalGroupDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(GoalGroup::from).collect())
    }

    async fn insert_group(&self, group: GoalGroup) -> Result<GoalGroup> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<GoalGroup> {
                let row = diesel::insert_into(goal_groups::table)
                    .values(GoalGroupDB::from(group))
                    .returning(GoalGroupDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(GoalGroup::from(row))
            })
            .await
    }

    async fn update_group(&self, group: GoalGroup) -> Result<GoalGroup> {
        let row = GoalGroupDB::from(group);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<GoalGroup> {
                let updated = diesel::update(
                    goal_groups::table
                        .filter(goal_groups::id.eq(&row.id))
                        .filter(goal_groups::user_id.eq(&row.user_id)),
                )
                .set(&row)
                .returning(GoalGroupDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?
                .ok_or_else(|| not_found("Goal group", &row.id))?;
                Ok(GoalGroup::from(updated))
            })
            .await
    }

    /// Member goals are detached by the `ON DELETE SET NULL` foreign key.
    async fn delete_group(&self, group_id: String, user_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    goal_groups::table
                        .filter(goal_groups::id.eq(group_id))
                        .filter(goal_groups::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
