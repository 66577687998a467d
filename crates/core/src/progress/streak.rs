//! Streak and summary statistics over a goal's progress records.
//!
//! A streak is a run of consecutive *records* with a non-zero completion rate.
//! Days without a record are simply absent from the input, so they neither
//! break nor extend a run.

use super::progress_model::{Progress, ProgressSummary};
use crate::goals::Goal;

/// Summarises `entries`, which must already be ordered by `tracked_date` ascending.
pub fn summarize(goal: &Goal, entries: &[Progress]) -> ProgressSummary {
    let mut total_completion = 0.0;
    let mut best_completion: f64 = 0.0;
    let mut running: u32 = 0;
    let mut longest: u32 = 0;

    for entry in entries {
        total_completion += entry.completion_rate;
        best_completion = best_completion.max(entry.completion_rate);

        if entry.completion_rate > 0.0 {
            running += 1;
            longest = longest.max(running);
        } else {
            running = 0;
        }
    }

    let total_entries = entries.len();
    let average_completion = if total_entries == 0 {
        0.0
    } else {
        total_completion / total_entries as f64
    };

    ProgressSummary {
        goal_id: goal.id.clone(),
        goal_title: goal.title.clone(),
        goal_type: goal.goal_type,
        total_entries,
        average_completion,
        best_completion,
        // The running counter after the last entry is the trailing run.
        current_streak: running,
        longest_streak: longest,
        last_tracked_date: entries.last().map(|entry| entry.tracked_date),
    }
}
