//! Progress module - daily entries, completion, streaks and heatmaps.

mod completion;
pub mod heatmap;
mod progress_model;
mod progress_service;
mod progress_traits;
pub mod streak;

#[cfg(test)]
mod progress_service_tests;

pub use completion::{compute_rate, intensity_level, CompletionLevel};
pub use progress_model::{
    DateRange, HeatmapCell, NewProgress, NewTimeProgress, Page, Progress, ProgressFilter,
    ProgressSummary, ProgressUpdate, ProgressWithGoal,
};
pub use progress_service::ProgressService;
pub use progress_traits::{ProgressRepositoryTrait, ProgressServiceTrait};
