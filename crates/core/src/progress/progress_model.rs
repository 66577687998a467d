//! Progress domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::completion::{intensity_level, CompletionLevel};
use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use crate::errors::{Error, Result};
use crate::goals::{Goal, GoalType};
use crate::utils::time_utils::default_range_start;

/// One observation of a goal on one calendar day.
///
/// At most one record exists per (goal, `tracked_date`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub id: String,
    pub goal_id: String,
    /// Copy of the goal's owner, used to scope every lookup
    pub user_id: String,
    /// Value in the goal type's base unit
    pub value: f64,
    /// Percentage in [0, 100]
    pub completion_rate: f64,
    pub notes: Option<String>,
    pub tracked_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.completion_rate >= 100.0
    }

    pub fn completion_level(&self) -> CompletionLevel {
        CompletionLevel::from_rate(self.completion_rate)
    }

    pub fn intensity_level(&self) -> u8 {
        intensity_level(self.completion_rate)
    }
}

/// Input for recording progress with a raw value.
///
/// `tracked_date` may carry a time-of-day; only its calendar day is kept.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewProgress {
    pub goal_id: String,
    pub value: f64,
    pub notes: Option<String>,
    pub tracked_date: NaiveDateTime,
}

/// Input for recording progress on a time goal as hours and minutes.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeProgress {
    pub goal_id: String,
    pub hours: u32,
    pub minutes: u32,
    pub notes: Option<String>,
    pub tracked_date: NaiveDateTime,
}

impl NewTimeProgress {
    pub fn total_minutes(&self) -> f64 {
        f64::from(self.hours) * 60.0 + f64::from(self.minutes)
    }
}

/// Partial update for a progress record. `None` leaves the field untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub value: Option<f64>,
    pub notes: Option<String>,
    pub tracked_date: Option<NaiveDateTime>,
}

/// Filter for listing progress records
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgressFilter {
    pub goal_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Resolved pagination for progress listings. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Out-of-range values fall back to the defaults rather than failing.
    pub fn resolve(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .filter(|l| (1..=MAX_PAGE_LIMIT).contains(l))
            .unwrap_or(DEFAULT_PAGE_LIMIT);
        Page { page, limit }
    }

    /// Saturates instead of overflowing for very large page numbers.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::resolve(None, None)
    }
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::invalid(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(DateRange { start, end })
    }

    /// One year back through `today`.
    pub fn default_ending(today: NaiveDate) -> Self {
        DateRange {
            start: default_range_start(today),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A progress record together with the goal it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressWithGoal {
    pub progress: Progress,
    pub goal: Goal,
}

/// Aggregate statistics for one goal over a date range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub goal_id: String,
    pub goal_title: String,
    pub goal_type: GoalType,
    pub total_entries: usize,
    pub average_completion: f64,
    pub best_completion: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_tracked_date: Option<NaiveDate>,
}

/// One renderable heatmap cell, one per progress record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub completion_rate: f64,
    /// Colour intensity bucket, 0 through 4
    pub intensity: u8,
    pub value: f64,
    pub goal_id: String,
    pub goal_title: String,
    pub goal_type: GoalType,
    pub color_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub formatted_value: String,
}
