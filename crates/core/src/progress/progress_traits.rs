use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::progress::progress_model::{
    DateRange, HeatmapCell, NewProgress, NewTimeProgress, Page, Progress, ProgressFilter,
    ProgressSummary, ProgressUpdate, ProgressWithGoal,
};

/// Storage boundary for progress records.
///
/// Every method is scoped by `user_id`. Implementations must also enforce
/// uniqueness of (goal_id, tracked_date) and report a violation as
/// `DatabaseError::UniqueViolation`.
#[async_trait]
pub trait ProgressRepositoryTrait: Send + Sync {
    fn get_progress(&self, progress_id: &str, user_id: &str) -> Result<Option<Progress>>;

    /// Finds the record for `goal_id` on `date`, ignoring `exclude_id` if given.
    fn find_progress_on_date(
        &self,
        goal_id: &str,
        user_id: &str,
        date: NaiveDate,
        exclude_id: Option<&str>,
    ) -> Result<Option<Progress>>;

    /// Newest first: `tracked_date` descending, then `created_at` descending.
    fn search_progress(
        &self,
        user_id: &str,
        filter: &ProgressFilter,
        page: Page,
    ) -> Result<Vec<Progress>>;

    /// All records inside the inclusive range, `tracked_date` ascending.
    fn get_progress_in_range(
        &self,
        user_id: &str,
        goal_id: Option<&str>,
        range: DateRange,
    ) -> Result<Vec<Progress>>;

    async fn insert_progress(&self, progress: Progress) -> Result<Progress>;
    async fn update_progress(&self, progress: Progress) -> Result<Progress>;
    /// Returns the number of records removed (0 or 1).
    async fn delete_progress(&self, progress_id: String, user_id: String) -> Result<usize>;
}

/// Trait for progress service operations
#[async_trait]
pub trait ProgressServiceTrait: Send + Sync {
    async fn create_progress(&self, user_id: &str, input: NewProgress)
        -> Result<ProgressWithGoal>;
    async fn create_time_progress(
        &self,
        user_id: &str,
        input: NewTimeProgress,
    ) -> Result<ProgressWithGoal>;
    fn get_progress(&self, user_id: &str, progress_id: &str) -> Result<ProgressWithGoal>;
    fn list_progress(
        &self,
        user_id: &str,
        filter: ProgressFilter,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Progress>>;
    async fn update_progress(
        &self,
        user_id: &str,
        progress_id: &str,
        update: ProgressUpdate,
    ) -> Result<ProgressWithGoal>;
    async fn delete_progress(&self, user_id: &str, progress_id: &str) -> Result<()>;
    fn get_progress_summary(
        &self,
        user_id: &str,
        goal_id: &str,
        range: Option<DateRange>,
    ) -> Result<ProgressSummary>;
    fn get_heatmap(&self, user_id: &str, range: Option<DateRange>) -> Result<Vec<HeatmapCell>>;
}
