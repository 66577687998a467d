//! Per-type unit semantics for goals.
//!
//! Each [`GoalType`] resolves to exactly one [`GoalTypeSemantics`] implementation.
//! Callers pick it once (usually through [`Goal::semantics`](super::Goal::semantics))
//! instead of branching on the type at every call site.

use super::goals_model::GoalType;
use crate::constants::{
    BOOLEAN_TARGET, DISTANCE_UNITS, MINUTES_PER_DAY, PLAUSIBILITY_MULTIPLIER, TIME_UNITS,
};
use crate::errors::{Error, Result};

/// Input normalisation, validation and display rules for one goal type.
pub trait GoalTypeSemantics: Send + Sync {
    fn goal_type(&self) -> GoalType;

    /// Converts raw input into the base unit stored on progress records.
    fn normalize(&self, raw: f64) -> f64;

    /// Checks that an already-normalised value is plausible for `target`.
    fn validate_value(&self, value: f64, target: f64) -> Result<()>;

    /// Checks a target/unit pair when a goal is defined or redefined.
    fn validate_target_definition(&self, target: f64, unit: &str) -> Result<()>;

    fn format_value(&self, value: f64, unit: &str) -> String;

    /// Display form of the goal's target. Defaults to formatting it as a value.
    fn format_target(&self, target: f64, unit: &str) -> String {
        self.format_value(target, unit)
    }
}

pub struct TimeSemantics;
pub struct QuantitySemantics;
pub struct DistanceSemantics;
pub struct BooleanSemantics;

static TIME: TimeSemantics = TimeSemantics;
static QUANTITY: QuantitySemantics = QuantitySemantics;
static DISTANCE: DistanceSemantics = DistanceSemantics;
static BOOLEAN: BooleanSemantics = BooleanSemantics;

impl GoalType {
    pub fn semantics(self) -> &'static dyn GoalTypeSemantics {
        match self {
            GoalType::Time => &TIME,
            GoalType::Quantity => &QUANTITY,
            GoalType::Distance => &DISTANCE,
            GoalType::Boolean => &BOOLEAN,
        }
    }
}

fn ensure_finite(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid("value must be a finite number"))
    }
}

/// Renders whole minutes as `"<H>h <M>m"`, dropping a zero component.
pub fn format_minutes(value: f64) -> String {
    let total = value.trunc() as i64;
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

fn format_measured(value: f64, unit: &str) -> String {
    format!("{:.1} {}", value, unit)
}

// Shared by quantity and distance goals. The ceiling only applies to positive
// targets; a non-positive target cannot be completed anyway.
fn validate_measured(label: &str, value: f64, target: f64) -> Result<()> {
    ensure_finite(value)?;
    if value < 0.0 {
        return Err(Error::invalid(format!("{} value must be non-negative", label)));
    }
    if target > 0.0 && value > target * PLAUSIBILITY_MULTIPLIER {
        return Err(Error::invalid(format!(
            "{} value seems unreasonably high",
            label
        )));
    }
    Ok(())
}

impl GoalTypeSemantics for TimeSemantics {
    fn goal_type(&self) -> GoalType {
        GoalType::Time
    }

    fn normalize(&self, raw: f64) -> f64 {
        raw
    }

    fn validate_value(&self, value: f64, _target: f64) -> Result<()> {
        ensure_finite(value)?;
        if !(0.0..=MINUTES_PER_DAY).contains(&value) {
            return Err(Error::invalid(
                "time value must be between 0 and 1440 minutes (24 hours)",
            ));
        }
        Ok(())
    }

    fn validate_target_definition(&self, target: f64, unit: &str) -> Result<()> {
        if !(target > 0.0 && target <= MINUTES_PER_DAY) {
            return Err(Error::invalid(
                "time target must be between 1 and 1440 minutes",
            ));
        }
        if !TIME_UNITS.contains(&unit) {
            return Err(Error::invalid(
                "time goals must use 'minutes' or 'hours' as unit",
            ));
        }
        Ok(())
    }

    fn format_value(&self, value: f64, _unit: &str) -> String {
        format_minutes(value)
    }
}

impl GoalTypeSemantics for QuantitySemantics {
    fn goal_type(&self) -> GoalType {
        GoalType::Quantity
    }

    fn normalize(&self, raw: f64) -> f64 {
        raw
    }

    fn validate_value(&self, value: f64, target: f64) -> Result<()> {
        validate_measured("quantity", value, target)
    }

    fn validate_target_definition(&self, target: f64, unit: &str) -> Result<()> {
        if !(target > 0.0) {
            return Err(Error::invalid("quantity target must be positive"));
        }
        if unit.trim().is_empty() {
            return Err(Error::invalid("quantity goals must specify a unit"));
        }
        Ok(())
    }

    fn format_value(&self, value: f64, unit: &str) -> String {
        format_measured(value, unit)
    }
}

impl GoalTypeSemantics for DistanceSemantics {
    fn goal_type(&self) -> GoalType {
        GoalType::Distance
    }

    fn normalize(&self, raw: f64) -> f64 {
        raw
    }

    fn validate_value(&self, value: f64, target: f64) -> Result<()> {
        validate_measured("distance", value, target)
    }

    fn validate_target_definition(&self, target: f64, unit: &str) -> Result<()> {
        if !(target > 0.0) {
            return Err(Error::invalid("distance target must be positive"));
        }
        if !DISTANCE_UNITS.contains(&unit) {
            return Err(Error::invalid(
                "distance goals must use 'km', 'miles', or 'meters' as unit",
            ));
        }
        Ok(())
    }

    fn format_value(&self, value: f64, unit: &str) -> String {
        format_measured(value, unit)
    }
}

impl GoalTypeSemantics for BooleanSemantics {
    fn goal_type(&self) -> GoalType {
        GoalType::Boolean
    }

    fn normalize(&self, raw: f64) -> f64 {
        if raw > 0.0 {
            1.0
        } else {
            0.0
        }
    }

    fn validate_value(&self, value: f64, _target: f64) -> Result<()> {
        if value != 0.0 && value != 1.0 {
            return Err(Error::invalid("boolean value must be 0 or 1"));
        }
        Ok(())
    }

    fn validate_target_definition(&self, target: f64, _unit: &str) -> Result<()> {
        if target != BOOLEAN_TARGET {
            return Err(Error::invalid("boolean goals must have target of 1"));
        }
        Ok(())
    }

    fn format_value(&self, value: f64, _unit: &str) -> String {
        if value > 0.0 {
            "Completed".to_string()
        } else {
            "Not completed".to_string()
        }
    }

    fn format_target(&self, _target: f64, _unit: &str) -> String {
        "Complete".to_string()
    }
}
