//! In-memory repositories shared by the service tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{Goal, GoalFilter, GoalGroup, GoalRepositoryTrait, GoalType, TrackingFrequency};
use crate::progress::{DateRange, Page, Progress, ProgressFilter, ProgressRepositoryTrait};

pub const USER: &str = "user-1";
pub const OTHER_USER: &str = "user-2";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn goal_fixture(id: &str, user_id: &str, goal_type: GoalType, target: f64) -> Goal {
    let ts = date(2025, 1, 1).and_hms_opt(0, 0, 0).unwrap();
    let unit = match goal_type {
        GoalType::Time => "minutes",
        GoalType::Quantity => "pages",
        GoalType::Distance => "km",
        GoalType::Boolean => "",
    };
    Goal {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: format!("Goal {}", id),
        description: None,
        goal_type,
        color_code: "#336699".to_string(),
        tracking_frequency: TrackingFrequency::Daily,
        target,
        unit: unit.to_string(),
        is_active: true,
        group_id: None,
        sort_order: 0,
        created_at: ts,
        updated_at: ts,
    }
}

#[derive(Default)]
pub struct InMemoryGoalRepository {
    goals: Mutex<Vec<Goal>>,
    groups: Mutex<Vec<GoalGroup>>,
}

impl InMemoryGoalRepository {
    pub fn with_goals(goals: Vec<Goal>) -> Self {
        Self {
            goals: Mutex::new(goals),
            groups: Mutex::new(Vec::new()),
        }
    }

    pub fn add_group(&self, group: GoalGroup) {
        self.groups.lock().unwrap().push(group);
    }

    pub fn goal_count(&self) -> usize {
        self.goals.lock().unwrap().len()
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryGoalRepository {
    fn get_goal(&self, goal_id: &str, user_id: &str) -> Result<Option<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == goal_id && g.user_id == user_id)
            .cloned())
    }

    fn list_goals(&self, user_id: &str, filter: &GoalFilter) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id)
            .filter(|g| filter.group_id.is_none() || g.group_id == filter.group_id)
            .filter(|g| filter.is_active.map_or(true, |active| g.is_active == active))
            .cloned()
            .collect();
        goals.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(goals)
    }

    async fn insert_goal(&self, goal: Goal) -> Result<Goal> {
        self.goals.lock().unwrap().push(goal.clone());
        Ok(goal)
    }

    async fn update_goal(&self, goal: Goal) -> Result<Goal> {
        let mut goals = self.goals.lock().unwrap();
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal.id && g.user_id == goal.user_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(goal.id.clone())))?;
        *slot = goal.clone();
        Ok(goal)
    }

    async fn delete_goal(&self, goal_id: String, user_id: String) -> Result<usize> {
        let mut goals = self.goals.lock().unwrap();
        let before = goals.len();
        goals.retain(|g| !(g.id == goal_id && g.user_id == user_id));
        Ok(before - goals.len())
    }

    fn get_group(&self, group_id: &str, user_id: &str) -> Result<Option<GoalGroup>> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == group_id && g.user_id == user_id)
            .cloned())
    }

    fn list_groups(&self, user_id: &str) -> Result<Vec<GoalGroup>> {
        let mut groups: Vec<GoalGroup> = self
            .groups
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        groups.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(groups)
    }

    async fn insert_group(&self, group: GoalGroup) -> Result<GoalGroup> {
        self.groups.lock().unwrap().push(group.clone());
        Ok(group)
    }

    async fn update_group(&self, group: GoalGroup) -> Result<GoalGroup> {
        let mut groups = self.groups.lock().unwrap();
        let slot = groups
            .iter_mut()
            .find(|g| g.id == group.id && g.user_id == group.user_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(group.id.clone())))?;
        *slot = group.clone();
        Ok(group)
    }

    async fn delete_group(&self, group_id: String, user_id: String) -> Result<usize> {
        let mut groups = self.groups.lock().unwrap();
        let before = groups.len();
        groups.retain(|g| !(g.id == group_id && g.user_id == user_id));
        let removed = before - groups.len();
        if removed > 0 {
            for goal in self.goals.lock().unwrap().iter_mut() {
                if goal.group_id.as_deref() == Some(group_id.as_str()) {
                    goal.group_id = None;
                }
            }
        }
        Ok(removed)
    }
}

/// Enforces (goal_id, tracked_date) uniqueness on writes like a real store.
///
/// With `hide_existing` set, date lookups always report a free slot, which
/// simulates a concurrent writer slipping in between check and insert.
/// With `vanish_on_update` set, the target record is removed just before an
/// update is applied, as if a concurrent delete won the race.
#[derive(Default)]
pub struct InMemoryProgressRepository {
    records: Mutex<Vec<Progress>>,
    hide_existing: AtomicBool,
    vanish_on_update: AtomicBool,
}

impl InMemoryProgressRepository {
    pub fn hide_existing_on_lookup(&self) {
        self.hide_existing.store(true, Ordering::SeqCst);
    }

    pub fn delete_before_next_update(&self) {
        self.vanish_on_update.store(true, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Progress> {
        self.records.lock().unwrap().clone()
    }

    pub fn seed(&self, progress: Progress) {
        self.records.lock().unwrap().push(progress);
    }

    fn collides(records: &[Progress], candidate: &Progress) -> bool {
        records.iter().any(|p| {
            p.id != candidate.id
                && p.goal_id == candidate.goal_id
                && p.tracked_date == candidate.tracked_date
        })
    }
}

#[async_trait]
impl ProgressRepositoryTrait for InMemoryProgressRepository {
    fn get_progress(&self, progress_id: &str, user_id: &str) -> Result<Option<Progress>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == progress_id && p.user_id == user_id)
            .cloned())
    }

    fn find_progress_on_date(
        &self,
        goal_id: &str,
        user_id: &str,
        date: NaiveDate,
        exclude_id: Option<&str>,
    ) -> Result<Option<Progress>> {
        if self.hide_existing.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|p| {
                p.goal_id == goal_id
                    && p.user_id == user_id
                    && p.tracked_date == date
                    && exclude_id != Some(p.id.as_str())
            })
            .cloned())
    }

    fn search_progress(
        &self,
        user_id: &str,
        filter: &ProgressFilter,
        page: Page,
    ) -> Result<Vec<Progress>> {
        let mut matching: Vec<Progress> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .filter(|p| filter.goal_id.as_deref().map_or(true, |g| p.goal_id == g))
            .filter(|p| filter.start_date.map_or(true, |d| p.tracked_date >= d))
            .filter(|p| filter.end_date.map_or(true, |d| p.tracked_date <= d))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.tracked_date
                .cmp(&a.tracked_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect())
    }

    fn get_progress_in_range(
        &self,
        user_id: &str,
        goal_id: Option<&str>,
        range: DateRange,
    ) -> Result<Vec<Progress>> {
        // Deliberately unordered so callers must sort.
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .filter(|p| goal_id.map_or(true, |g| p.goal_id == g))
            .filter(|p| range.contains(p.tracked_date))
            .cloned()
            .collect())
    }

    async fn insert_progress(&self, progress: Progress) -> Result<Progress> {
        let mut records = self.records.lock().unwrap();
        if Self::collides(&records, &progress) {
            return Err(Error::Database(DatabaseError::UniqueViolation(
                "UNIQUE constraint failed: progress.goal_id, progress.tracked_date".to_string(),
            )));
        }
        records.push(progress.clone());
        Ok(progress)
    }

    async fn update_progress(&self, progress: Progress) -> Result<Progress> {
        let mut records = self.records.lock().unwrap();
        if self.vanish_on_update.swap(false, Ordering::SeqCst) {
            records.retain(|p| p.id != progress.id);
        }
        if Self::collides(&records, &progress) {
            return Err(Error::Database(DatabaseError::UniqueViolation(
                "UNIQUE constraint failed: progress.goal_id, progress.tracked_date".to_string(),
            )));
        }
        let slot = records
            .iter_mut()
            .find(|p| p.id == progress.id && p.user_id == progress.user_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(progress.id.clone())))?;
        *slot = progress.clone();
        Ok(progress)
    }

    async fn delete_progress(&self, progress_id: String, user_id: String) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|p| !(p.id == progress_id && p.user_id == user_id));
        Ok(before - records.len())
    }
}
