//! Database models for goals and goal groups.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use streakmap_core::goals::{Goal, GoalGroup, GoalType, TrackingFrequency};

/// Database model for goals. Enums are stored as their lowercase names.
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
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub goal_type: String,
    pub color_code: String,
    pub tracking_frequency: String,
    pub target: f64,
    pub unit: String,
    pub is_active: bool,
    pub group_id: Option<String>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for goal groups
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
#[diesel(table_name = crate::schema::goal_groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct GoalGroupDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub color_code: Option<String>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl TryFrom<GoalDB> for Goal {
    type Error = StorageError;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        let goal_type = db
            .goal_type
            .parse::<GoalType>()
            .map_err(|e| StorageError::Decode(e.to_string()))?;
        let tracking_frequency = db
            .tracking_frequency
            .parse::<TrackingFrequency>()
            .map_err(|e| StorageError::Decode(e.to_string()))?;
        Ok(Goal {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            goal_type,
            color_code: db.color_code,
            tracking_frequency,
            target: db.target,
            unit: db.unit,
            is_active: db.is_active,
            group_id: db.group_id,
            sort_order: db.sort_order,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            title: domain.title,
            description: domain.description,
            goal_type: domain.goal_type.as_str().to_string(),
            color_code: domain.color_code,
            tracking_frequency: domain.tracking_frequency.as_str().to_string(),
            target: domain.target,
            unit: domain.unit,
            is_active: domain.is_active,
            group_id: domain.group_id,
            sort_order: domain.sort_order,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<GoalGroupDB> for GoalGroup {
    fn from(db: GoalGroupDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            color_code: db.color_code,
            sort_order: db.sort_order,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<GoalGroup> for GoalGroupDB {
    fn from(domain: GoalGroup) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            description: domain.description,
            color_code: domain.color_code,
            sort_order: domain.sort_order,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

/// Converts a batch of rows, failing on the first undecodable one.
pub fn into_goals(rows: Vec<GoalDB>) -> Result<Vec<Goal>, StorageError> {
    rows.into_iter().map(Goal::try_from).collect()
}
