//! Streakmap Core - the goal-progress domain engine.
//!
//! This crate contains the business logic for tracking measurable goals:
//! per-type unit semantics, completion rates, the one-entry-per-day rule for
//! progress records, and streak/heatmap reporting. It is database-agnostic and
//! defines repository traits that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod goals;
pub mod progress;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
