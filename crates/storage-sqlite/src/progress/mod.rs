//! SQLite storage implementation for progress entries.

mod model;
mod repository;

pub use model::ProgressDB;
pub use repository::ProgressRepository;
