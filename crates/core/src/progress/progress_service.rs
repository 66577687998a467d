use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use super::completion::compute_rate;
use super::heatmap;
use super::progress_model::{
    DateRange, HeatmapCell, NewProgress, NewTimeProgress, Page, Progress, ProgressFilter,
    ProgressSummary, ProgressUpdate, ProgressWithGoal,
};
use super::progress_traits::{ProgressRepositoryTrait, ProgressServiceTrait};
use super::streak;
use crate::constants::{MAX_ENTRY_HOURS, MAX_ENTRY_MINUTES, MAX_NOTES_LENGTH};
use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{Goal, GoalFilter, GoalRepositoryTrait, GoalType};
use crate::utils::time_utils::{calendar_day, now_utc, today_utc};
use crate::utils::validation::ensure_max_len;

const DUPLICATE_ENTRY: &str = "Progress entry already exists for this date";

/// Owns the lifecycle of progress records: one per goal per calendar day.
pub struct ProgressService {
    progress_repo: Arc<dyn ProgressRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl ProgressService {
    pub fn new(
        progress_repo: Arc<dyn ProgressRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        ProgressService {
            progress_repo,
            goal_repo,
        }
    }

    fn load_goal(&self, goal_id: &str, user_id: &str) -> Result<Goal> {
        self.goal_repo
            .get_goal(goal_id, user_id)?
            .ok_or_else(|| Error::NotFound("Goal not found".to_string()))
    }

    fn load_progress(&self, progress_id: &str, user_id: &str) -> Result<Progress> {
        self.progress_repo
            .get_progress(progress_id, user_id)?
            .ok_or_else(|| Error::NotFound("Progress entry not found".to_string()))
    }

    fn ensure_slot_free(
        &self,
        goal_id: &str,
        user_id: &str,
        date: NaiveDate,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        if self
            .progress_repo
            .find_progress_on_date(goal_id, user_id, date, exclude_id)?
            .is_some()
        {
            debug!("Goal {} already has an entry on {}", goal_id, date);
            return Err(Error::Conflict(DUPLICATE_ENTRY.to_string()));
        }
        Ok(())
    }

    /// Normalises and validates a raw value, returning it with its completion rate.
    fn measure(goal: &Goal, raw: f64) -> Result<(f64, f64)> {
        let value = goal.normalize(raw);
        goal.validate_value(value)?;
        Ok((value, compute_rate(value, goal.target)))
    }

    fn validate_notes(notes: Option<&str>) -> Result<()> {
        match notes {
            Some(notes) => ensure_max_len("notes", notes, MAX_NOTES_LENGTH),
            None => Ok(()),
        }
    }

    /// Shared tail of both create paths, after the value is known.
    async fn record(
        &self,
        user_id: &str,
        goal: Goal,
        raw_value: f64,
        notes: Option<String>,
        date: NaiveDate,
    ) -> Result<ProgressWithGoal> {
        Self::validate_notes(notes.as_deref())?;
        self.ensure_slot_free(&goal.id, user_id, date, None)?;
        let (value, completion_rate) = Self::measure(&goal, raw_value)?;

        let now = now_utc();
        let progress = Progress {
            id: Uuid::new_v4().to_string(),
            goal_id: goal.id.clone(),
            user_id: user_id.to_string(),
            value,
            completion_rate,
            notes,
            tracked_date: date,
            created_at: now,
            updated_at: now,
        };

        let progress = self
            .progress_repo
            .insert_progress(progress)
            .await
            .map_err(map_write_error)?;
        Ok(ProgressWithGoal { progress, goal })
    }

    fn resolve_range(range: Option<DateRange>) -> DateRange {
        range.unwrap_or_else(|| DateRange::default_ending(today_utc()))
    }
}

/// A uniqueness violation from the store means another request won the race
/// for the same slot; it is the same outcome as the read-before-write check.
fn map_write_error(err: Error) -> Error {
    match err {
        Error::Database(DatabaseError::UniqueViolation(detail)) => {
            debug!("Store rejected duplicate progress entry: {}", detail);
            Error::Conflict(DUPLICATE_ENTRY.to_string())
        }
        Error::Database(DatabaseError::NotFound(_)) => {
            Error::NotFound("Progress entry not found".to_string())
        }
        other => other,
    }
}

#[async_trait]
impl ProgressServiceTrait for ProgressService {
    async fn create_progress(
        &self,
        user_id: &str,
        input: NewProgress,
    ) -> Result<ProgressWithGoal> {
        let goal = self.load_goal(&input.goal_id, user_id)?;
        let date = calendar_day(input.tracked_date);
        self.record(user_id, goal, input.value, input.notes, date)
            .await
    }

    async fn create_time_progress(
        &self,
        user_id: &str,
        input: NewTimeProgress,
    ) -> Result<ProgressWithGoal> {
        if input.hours > MAX_ENTRY_HOURS {
            return Err(Error::invalid(format!(
                "hours must be between 0 and {}",
                MAX_ENTRY_HOURS
            )));
        }
        if input.minutes > MAX_ENTRY_MINUTES {
            return Err(Error::invalid(format!(
                "minutes must be between 0 and {}",
                MAX_ENTRY_MINUTES
            )));
        }

        let goal = self.load_goal(&input.goal_id, user_id)?;
        if goal.goal_type != GoalType::Time {
            return Err(Error::invalid(
                "goal type must be 'time' for hour/minute entries",
            ));
        }

        let minutes = input.total_minutes();
        let date = calendar_day(input.tracked_date);
        self.record(user_id, goal, minutes, input.notes, date).await
    }

    fn get_progress(&self, user_id: &str, progress_id: &str) -> Result<ProgressWithGoal> {
        let progress = self.load_progress(progress_id, user_id)?;
        let goal = self.load_goal(&progress.goal_id, user_id)?;
        Ok(ProgressWithGoal { progress, goal })
    }

    fn list_progress(
        &self,
        user_id: &str,
        filter: ProgressFilter,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Progress>> {
        let page = Page::resolve(page, limit);
        self.progress_repo.search_progress(user_id, &filter, page)
    }

    async fn update_progress(
        &self,
        user_id: &str,
        progress_id: &str,
        update: ProgressUpdate,
    ) -> Result<ProgressWithGoal> {
        let mut progress = self.load_progress(progress_id, user_id)?;
        let goal = self.load_goal(&progress.goal_id, user_id)?;

        if let Some(raw) = update.value {
            let (value, completion_rate) = Self::measure(&goal, raw)?;
            progress.value = value;
            progress.completion_rate = completion_rate;
        }
        if let Some(notes) = update.notes {
            Self::validate_notes(Some(&notes))?;
            progress.notes = Some(notes);
        }
        if let Some(tracked_date) = update.tracked_date {
            let date = calendar_day(tracked_date);
            self.ensure_slot_free(&progress.goal_id, user_id, date, Some(&progress.id))?;
            progress.tracked_date = date;
        }

        progress.updated_at = now_utc();
        let progress = self
            .progress_repo
            .update_progress(progress)
            .await
            .map_err(map_write_error)?;
        Ok(ProgressWithGoal { progress, goal })
    }

    async fn delete_progress(&self, user_id: &str, progress_id: &str) -> Result<()> {
        let removed = self
            .progress_repo
            .delete_progress(progress_id.to_string(), user_id.to_string())
            .await?;
        if removed == 0 {
            return Err(Error::NotFound("Progress entry not found".to_string()));
        }
        Ok(())
    }

    fn get_progress_summary(
        &self,
        user_id: &str,
        goal_id: &str,
        range: Option<DateRange>,
    ) -> Result<ProgressSummary> {
        let goal = self.load_goal(goal_id, user_id)?;
        let range = Self::resolve_range(range);
        let mut entries = self
            .progress_repo
            .get_progress_in_range(user_id, Some(goal_id), range)?;
        entries.sort_by_key(|p| p.tracked_date);
        Ok(streak::summarize(&goal, &entries))
    }

    fn get_heatmap(&self, user_id: &str, range: Option<DateRange>) -> Result<Vec<HeatmapCell>> {
        let range = Self::resolve_range(range);
        let entries = self
            .progress_repo
            .get_progress_in_range(user_id, None, range)?;
        let goals = self
            .goal_repo
            .list_goals(user_id, &GoalFilter::default())?;
        Ok(heatmap::assemble(
            heatmap::join_goals(entries, &goals),
            &range,
        ))
    }
}
