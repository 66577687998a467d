//! Goals module - domain models, per-type semantics, services, and traits.

mod goal_type;
mod goals_model;
mod goals_service;
mod goals_traits;


pub use goal_type::{
    format_minutes, BooleanSemantics, DistanceSemantics, GoalTypeSemantics, QuantitySemantics,
    TimeSemantics,
};
pub use goals_model::{
    Goal, GoalFilter, GoalGroup, GoalGroupUpdate, GoalType, GoalUpdate, NewGoal, NewGoalGroup,
    TrackingFrequency, FREQUENCY_DAILY, FREQUENCY_MONTHLY, FREQUENCY_WEEKLY, GOAL_TYPE_BOOLEAN,
    GOAL_TYPE_DISTANCE, GOAL_TYPE_QUANTITY, GOAL_TYPE_TIME,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
