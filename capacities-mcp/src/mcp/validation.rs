//! Argument validation for Capacities tools
//!
//! Constraints are checked, never enforced by truncation.

use crate::error::{CapacitiesError, Result};

/// Ceiling for markdown note text
pub const MAX_MD_TEXT_LENGTH: usize = 200_000;

/// Ceiling for weblink title and description overrides
pub const MAX_OVERWRITE_LENGTH: usize = 500;

/// Ceiling for the number of tags on a weblink
pub const MAX_TAGS: usize = 30;

/// Length of a hyphenated UUID such as `123e4567-e89b-12d3-a456-426614174000`
const HYPHENATED_UUID_LENGTH: usize = 36;

/// Require the canonical hyphenated UUID form
pub fn validate_uuid(field: &str, value: &str) -> Result<()> {
    if value.len() != HYPHENATED_UUID_LENGTH || uuid::Uuid::try_parse(value).is_err() {
        return Err(CapacitiesError::validation(
            field,
            format!("'{value}' is not a valid UUID"),
        ));
    }
    Ok(())
}

/// Require every element to be a canonical UUID
pub fn validate_uuid_list(field: &str, values: &[String]) -> Result<()> {
    for (index, value) in values.iter().enumerate() {
        validate_uuid(&format!("{field}[{index}]"), value)?;
    }
    Ok(())
}

/// Require an absolute URL
pub fn validate_url(field: &str, value: &str) -> Result<()> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| CapacitiesError::validation(field, format!("'{value}' is not a valid URL: {e}")))
}

/// Require at most `max` characters
pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<()> {
    let length = value.chars().count();
    if length > max {
        return Err(CapacitiesError::validation(
            field,
            format!("must be at most {max} characters, got {length}"),
        ));
    }
    Ok(())
}

/// Require at most `max` items
pub fn validate_max_items<T>(field: &str, values: &[T], max: usize) -> Result<()> {
    if values.len() > max {
        return Err(CapacitiesError::validation(
            field,
            format!("must contain at most {max} items, got {}", values.len()),
        ));
    }
    Ok(())
}
