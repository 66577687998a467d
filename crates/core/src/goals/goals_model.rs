//! Goals domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::goal_type::GoalTypeSemantics;
use crate::constants::DAILY_MAX_DAYS_AHEAD;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::default_range_start;

pub const GOAL_TYPE_TIME: &str = "time";
pub const GOAL_TYPE_QUANTITY: &str = "quantity";
pub const GOAL_TYPE_BOOLEAN: &str = "boolean";
pub const GOAL_TYPE_DISTANCE: &str = "distance";

pub const FREQUENCY_DAILY: &str = "daily";
pub const FREQUENCY_WEEKLY: &str = "weekly";
pub const FREQUENCY_MONTHLY: &str = "monthly";

/// What a goal measures. Determines how raw input is normalised, validated
/// and displayed (see [`GoalTypeSemantics`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    /// Minutes spent, e.g. "2h 30m study"
    Time,
    /// A count, e.g. "10 pages read"
    Quantity,
    /// Done or not done, e.g. "did workout"
    Boolean,
    /// A length, e.g. "5 km run"
    Distance,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Time => GOAL_TYPE_TIME,
            GoalType::Quantity => GOAL_TYPE_QUANTITY,
            GoalType::Boolean => GOAL_TYPE_BOOLEAN,
            GoalType::Distance => GOAL_TYPE_DISTANCE,
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            GOAL_TYPE_TIME => Ok(GoalType::Time),
            GOAL_TYPE_QUANTITY => Ok(GoalType::Quantity),
            GOAL_TYPE_BOOLEAN => Ok(GoalType::Boolean),
            GOAL_TYPE_DISTANCE => Ok(GoalType::Distance),
            other => Err(Error::Validation(ValidationError::UnknownVariant {
                kind: "goal type".to_string(),
                value: other.to_string(),
            })),
        }
    }
}

/// How often a goal is meant to be tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl TrackingFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingFrequency::Daily => FREQUENCY_DAILY,
            TrackingFrequency::Weekly => FREQUENCY_WEEKLY,
            TrackingFrequency::Monthly => FREQUENCY_MONTHLY,
        }
    }

    /// Checks that `date` is a sensible slot for this frequency.
    ///
    /// Daily entries must fall within the last year and at most one day after
    /// `today`; weekly entries must be on a Monday; monthly entries on the
    /// first of the month.
    pub fn validate_tracked_date(&self, date: NaiveDate, today: NaiveDate) -> Result<()> {
        match self {
            TrackingFrequency::Daily => {
                let earliest = default_range_start(today);
                let latest = today + Duration::days(DAILY_MAX_DAYS_AHEAD);
                if date < earliest || date > latest {
                    return Err(Error::invalid(
                        "daily tracking date must be within the last year and not more than 1 day in the future",
                    ));
                }
            }
            TrackingFrequency::Weekly => {
                if date.weekday() != Weekday::Mon {
                    return Err(Error::invalid("weekly tracking must start on Monday"));
                }
            }
            TrackingFrequency::Monthly => {
                if date.day() != 1 {
                    return Err(Error::invalid(
                        "monthly tracking must be on the first day of the month",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TrackingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackingFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            FREQUENCY_DAILY => Ok(TrackingFrequency::Daily),
            FREQUENCY_WEEKLY => Ok(TrackingFrequency::Weekly),
            FREQUENCY_MONTHLY => Ok(TrackingFrequency::Monthly),
            other => Err(Error::Validation(ValidationError::UnknownVariant {
                kind: "tracking frequency".to_string(),
                value: other.to_string(),
            })),
        }
    }
}

/// Domain model representing a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub color_code: String,
    pub tracking_frequency: TrackingFrequency,
    /// Target in the goal type's base unit (minutes for time goals)
    pub target: f64,
    pub unit: String,
    pub is_active: bool,
    pub group_id: Option<String>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// The unit semantics for this goal's type.
    pub fn semantics(&self) -> &'static dyn GoalTypeSemantics {
        self.goal_type.semantics()
    }

    /// Converts raw user input into the goal's base unit.
    pub fn normalize(&self, raw: f64) -> f64 {
        self.semantics().normalize(raw)
    }

    /// Checks a base-unit value against this goal's plausibility rules.
    pub fn validate_value(&self, value: f64) -> Result<()> {
        self.semantics().validate_value(value, self.target)
    }

    pub fn format_value(&self, value: f64) -> String {
        self.semantics().format_value(value, &self.unit)
    }

    pub fn format_target(&self) -> String {
        self.semantics().format_target(self.target, &self.unit)
    }
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub color_code: String,
    pub tracking_frequency: TrackingFrequency,
    pub target: f64,
    #[serde(default)]
    pub unit: String,
    pub group_id: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Partial update for a goal. `None` leaves the field untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: Option<GoalType>,
    pub color_code: Option<String>,
    pub tracking_frequency: Option<TrackingFrequency>,
    pub target: Option<f64>,
    pub unit: Option<String>,
    pub is_active: Option<bool>,
    pub group_id: Option<String>,
    pub sort_order: Option<i32>,
}

/// Filter for listing a user's goals
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalFilter {
    pub group_id: Option<String>,
    pub is_active: Option<bool>,
}

/// Named collection of goals, used for display grouping only
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalGroup {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub color_code: Option<String>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoalGroup {
    pub name: String,
    pub description: Option<String>,
    pub color_code: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalGroupUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color_code: Option<String>,
    pub sort_order: Option<i32>,
}
