/// Minutes in a calendar day; upper bound for time values and time targets
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Quantity and distance entries above `target * PLAUSIBILITY_MULTIPLIER` are rejected
pub const PLAUSIBILITY_MULTIPLIER: f64 = 10.0;

/// Boolean goals must be defined with exactly this target
pub const BOOLEAN_TARGET: f64 = 1.0;

/// Units accepted for time goals
pub const TIME_UNITS: &[&str] = &["minutes", "hours"];

/// Units accepted for distance goals
pub const DISTANCE_UNITS: &[&str] = &["km", "miles", "meters"];

/// Hours/minutes bounds for time-entry input
pub const MAX_ENTRY_HOURS: u32 = 23;
pub const MAX_ENTRY_MINUTES: u32 = 59;

/// Heatmap and summary queries default to this many years back from today
pub const DEFAULT_LOOKBACK_YEARS: u32 = 1;

/// Daily entries may be dated at most this many days into the future
pub const DAILY_MAX_DAYS_AHEAD: i64 = 1;

/// Pagination defaults for progress listings
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_LIMIT: i64 = 20;
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Free-text field limits
pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_NOTES_LENGTH: usize = 1000;
pub const MAX_UNIT_LENGTH: usize = 50;
