use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use super::goals_model::{
    Goal, GoalFilter, GoalGroup, GoalGroupUpdate, GoalType, GoalUpdate, NewGoal, NewGoalGroup,
};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::constants::{MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, MAX_UNIT_LENGTH};
use crate::errors::{Error, Result};
use crate::utils::time_utils::now_utc;
use crate::utils::validation::{ensure_hex_color, ensure_max_len, ensure_present};

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repo }
    }

    /// Validates the fields shared by create and update.
    fn validate_definition(
        title: &str,
        description: Option<&str>,
        color_code: &str,
        goal_type: GoalType,
        target: f64,
        unit: &str,
    ) -> Result<()> {
        ensure_present("title", title)?;
        ensure_max_len("title", title, MAX_TITLE_LENGTH)?;
        if let Some(description) = description {
            ensure_max_len("description", description, MAX_DESCRIPTION_LENGTH)?;
        }
        ensure_hex_color("color_code", color_code)?;
        ensure_max_len("unit", unit, MAX_UNIT_LENGTH)?;
        goal_type
            .semantics()
            .validate_target_definition(target, unit)
    }

    fn ensure_group_owned(&self, group_id: &str, user_id: &str) -> Result<()> {
        match self.goal_repo.get_group(group_id, user_id)? {
            Some(_) => Ok(()),
            None => Err(Error::NotFound("Goal group not found".to_string())),
        }
    }

    fn validate_group_fields(
        name: &str,
        description: Option<&str>,
        color_code: Option<&str>,
    ) -> Result<()> {
        ensure_present("name", name)?;
        ensure_max_len("name", name, MAX_TITLE_LENGTH)?;
        if let Some(description) = description {
            ensure_max_len("description", description, MAX_DESCRIPTION_LENGTH)?;
        }
        if let Some(color) = color_code {
            ensure_hex_color("color_code", color)?;
        }
        Ok(())
    }

    fn load_group(&self, user_id: &str, group_id: &str) -> Result<GoalGroup> {
        self.goal_repo
            .get_group(group_id, user_id)?
            .ok_or_else(|| Error::NotFound("Goal group not found".to_string()))
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.goal_repo
            .get_goal(goal_id, user_id)?
            .ok_or_else(|| Error::NotFound("Goal not found".to_string()))
    }

    fn list_goals(&self, user_id: &str, filter: GoalFilter) -> Result<Vec<Goal>> {
        self.goal_repo.list_goals(user_id, &filter)
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        Self::validate_definition(
            &new_goal.title,
            new_goal.description.as_deref(),
            &new_goal.color_code,
            new_goal.goal_type,
            new_goal.target,
            &new_goal.unit,
        )?;
        if let Some(group_id) = new_goal.group_id.as_deref() {
            self.ensure_group_owned(group_id, user_id)?;
        }

        let now = now_utc();
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: new_goal.title,
            description: new_goal.description,
            goal_type: new_goal.goal_type,
            color_code: new_goal.color_code,
            tracking_frequency: new_goal.tracking_frequency,
            target: new_goal.target,
            unit: new_goal.unit,
            is_active: true,
            group_id: new_goal.group_id,
            sort_order: new_goal.sort_order,
            created_at: now,
            updated_at: now,
        };
        debug!("Creating {} goal '{}'", goal.goal_type, goal.title);
        self.goal_repo.insert_goal(goal).await
    }

    async fn update_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        update: GoalUpdate,
    ) -> Result<Goal> {
        let mut goal = self.get_goal(user_id, goal_id)?;

        if let Some(title) = update.title {
            goal.title = title;
        }
        if let Some(description) = update.description {
            goal.description = Some(description);
        }
        if let Some(goal_type) = update.goal_type {
            goal.goal_type = goal_type;
        }
        if let Some(color_code) = update.color_code {
            goal.color_code = color_code;
        }
        if let Some(frequency) = update.tracking_frequency {
            goal.tracking_frequency = frequency;
        }
        if let Some(target) = update.target {
            goal.target = target;
        }
        if let Some(unit) = update.unit {
            goal.unit = unit;
        }
        if let Some(is_active) = update.is_active {
            goal.is_active = is_active;
        }
        if let Some(group_id) = update.group_id {
            self.ensure_group_owned(&group_id, user_id)?;
            goal.group_id = Some(group_id);
        }
        if let Some(sort_order) = update.sort_order {
            goal.sort_order = sort_order;
        }

        Self::validate_definition(
            &goal.title,
            goal.description.as_deref(),
            &goal.color_code,
            goal.goal_type,
            goal.target,
            &goal.unit,
        )?;

        goal.updated_at = now_utc();
        self.goal_repo.update_goal(goal).await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        let removed = self
            .goal_repo
            .delete_goal(goal_id.to_string(), user_id.to_string())
            .await?;
        if removed == 0 {
            return Err(Error::NotFound("Goal not found".to_string()));
        }
        Ok(())
    }

    fn list_groups(&self, user_id: &str) -> Result<Vec<GoalGroup>> {
        self.goal_repo.list_groups(user_id)
    }

    async fn create_group(&self, user_id: &str, new_group: NewGoalGroup) -> Result<GoalGroup> {
        Self::validate_group_fields(
            &new_group.name,
            new_group.description.as_deref(),
            new_group.color_code.as_deref(),
        )?;

        let now = now_utc();
        let group = GoalGroup {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_group.name,
            description: new_group.description,
            color_code: new_group.color_code,
            sort_order: new_group.sort_order,
            created_at: now,
            updated_at: now,
        };
        self.goal_repo.insert_group(group).await
    }

    async fn update_group(
        &self,
        user_id: &str,
        group_id: &str,
        update: GoalGroupUpdate,
    ) -> Result<GoalGroup> {
        let mut group = self.load_group(user_id, group_id)?;

        if let Some(name) = update.name {
            group.name = name;
        }
        if let Some(description) = update.description {
            group.description = Some(description);
        }
        if let Some(color_code) = update.color_code {
            group.color_code = Some(color_code);
        }
        if let Some(sort_order) = update.sort_order {
            group.sort_order = sort_order;
        }

        Self::validate_group_fields(
            &group.name,
            group.description.as_deref(),
            group.color_code.as_deref(),
        )?;

        group.updated_at = now_utc();
        self.goal_repo.update_group(group).await
    }

    async fn delete_group(&self, user_id: &str, group_id: &str) -> Result<()> {
        let removed = self
            .goal_repo
            .delete_group(group_id.to_string(), user_id.to_string())
            .await?;
        if removed == 0 {
            return Err(Error::NotFound("Goal group not found".to_string()));
        }
        Ok(())
    }
}
