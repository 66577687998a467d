use crate::errors::Result;
use crate::goals::goals_model::{
    Goal, GoalFilter, GoalGroup, GoalGroupUpdate, GoalUpdate, NewGoal, NewGoalGroup,
};
use async_trait::async_trait;

/// Trait for goal repository operations.
///
/// Every lookup is scoped by `user_id`; a goal owned by someone else is
/// reported exactly like a missing one.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_goal(&self, goal_id: &str, user_id: &str) -> Result<Option<Goal>>;
    /// Ordered by `sort_order`, then `created_at`.
    fn list_goals(&self, user_id: &str, filter: &GoalFilter) -> Result<Vec<Goal>>;
    async fn insert_goal(&self, goal: Goal) -> Result<Goal>;
    async fn update_goal(&self, goal: Goal) -> Result<Goal>;
    /// Returns the number of goals removed (0 or 1).
    async fn delete_goal(&self, goal_id: String, user_id: String) -> Result<usize>;

    fn get_group(&self, group_id: &str, user_id: &str) -> Result<Option<GoalGroup>>;
    fn list_groups(&self, user_id: &str) -> Result<Vec<GoalGroup>>;
    async fn insert_group(&self, group: GoalGroup) -> Result<GoalGroup>;
    async fn update_group(&self, group: GoalGroup) -> Result<GoalGroup>;
    async fn delete_group(&self, group_id: String, user_id: String) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    fn list_goals(&self, user_id: &str, filter: GoalFilter) -> Result<Vec<Goal>>;
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate)
        -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;

    fn list_groups(&self, user_id: &str) -> Result<Vec<GoalGroup>>;
    async fn create_group(&self, user_id: &str, new_group: NewGoalGroup) -> Result<GoalGroup>;
    async fn update_group(
        &self,
        user_id: &str,
        group_id: &str,
        update: GoalGroupUpdate,
    ) -> Result<GoalGroup>;
    async fn delete_group(&self, user_id: &str, group_id: &str) -> Result<()>;
}
