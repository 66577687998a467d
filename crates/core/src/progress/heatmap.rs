//! Heatmap assembly: one cell per progress record, enriched with goal metadata.

use std::collections::HashMap;

use super::completion::intensity_level;
use super::progress_model::{DateRange, HeatmapCell, Progress};
use crate::goals::Goal;

/// Pairs each record with its goal by goal id.
///
/// Records whose goal is not in `goals` are dropped, matching an inner join.
pub fn join_goals<'a>(progress: Vec<Progress>, goals: &'a [Goal]) -> Vec<(Progress, &'a Goal)> {
    let by_id: HashMap<&str, &Goal> = goals.iter().map(|g| (g.id.as_str(), g)).collect();
    progress
        .into_iter()
        .filter_map(|p| {
            let goal = by_id.get(p.goal_id.as_str()).copied()?;
            Some((p, goal))
        })
        .collect()
}

/// Builds heatmap cells for the records inside `range`, ordered by date ascending.
///
/// Days with no record produce no cell.
pub fn assemble<'a, I>(entries: I, range: &DateRange) -> Vec<HeatmapCell>
where
    I: IntoIterator<Item = (Progress, &'a Goal)>,
{
    let mut cells: Vec<HeatmapCell> = entries
        .into_iter()
        .filter(|(progress, _)| range.contains(progress.tracked_date))
        .map(|(progress, goal)| HeatmapCell {
            date: progress.tracked_date,
            completion_rate: progress.completion_rate,
            intensity: intensity_level(progress.completion_rate),
            value: progress.value,
            goal_id: goal.id.clone(),
            goal_title: goal.title.clone(),
            goal_type: goal.goal_type,
            color_code: goal.color_code.clone(),
            notes: progress.notes.filter(|n| !n.is_empty()),
            formatted_value: goal.format_value(progress.value),
        })
        .collect();

    cells.sort_by_key(|cell| cell.date);
    cells
}
