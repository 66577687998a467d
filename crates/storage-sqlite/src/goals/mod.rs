//! SQLite storage implementation for goals and goal groups.

mod model;
mod repository;

pub use model::{GoalDB, GoalGroupDB};
pub use repository::GoalRepository;
