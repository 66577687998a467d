//! Field-level checks shared by the goal and progress services.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{Error, Result, ValidationError};

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex colour pattern is valid")
});

/// Accepts `#RGB` and `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

pub fn ensure_hex_color(field: &str, value: &str) -> Result<()> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "{} must be a hex colour like #1A2B3C",
            field
        )))
    }
}

/// Rejects empty or whitespace-only values.
pub fn ensure_present(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn ensure_max_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(Error::Validation(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }));
    }
    Ok(())
}
