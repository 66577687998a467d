//! Completion rate and the two bucketings derived from it.
//!
//! `intensity_level` drives heatmap colour and `CompletionLevel` drives textual
//! summaries. They use different thresholds and are not interchangeable.

use serde::{Deserialize, Serialize};

/// `value / target` as a percentage, capped at 100.
///
/// A non-positive target yields 0: such a goal cannot be completed.
pub fn compute_rate(value: f64, target: f64) -> f64 {
    if !(target > 0.0) {
        return 0.0;
    }
    let rate = (value / target) * 100.0;
    if rate > 100.0 {
        100.0
    } else {
        rate
    }
}

/// Heatmap intensity bucket: <10 → 0, <40 → 1, <70 → 2, <90 → 3, otherwise 4.
pub fn intensity_level(rate: f64) -> u8 {
    if rate >= 90.0 {
        4
    } else if rate >= 70.0 {
        3
    } else if rate >= 40.0 {
        2
    } else if rate >= 10.0 {
        1
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionLevel {
    Minimal,
    Low,
    Medium,
    High,
    Complete,
}

impl CompletionLevel {
    /// <25 minimal, <50 low, <75 medium, <100 high, otherwise complete.
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 100.0 {
            CompletionLevel::Complete
        } else if rate >= 75.0 {
            CompletionLevel::High
        } else if rate >= 50.0 {
            CompletionLevel::Medium
        } else if rate >= 25.0 {
            CompletionLevel::Low
        } else {
            CompletionLevel::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionLevel::Minimal => "minimal",
            CompletionLevel::Low => "low",
            CompletionLevel::Medium => "medium",
            CompletionLevel::High => "high",
            CompletionLevel::Complete => "complete",
        }
    }
}
