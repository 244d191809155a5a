//! Scene field limits and validation.
//!
//! These checks run in the HTTP handlers before a scene is persisted. The
//! conflict detector does not depend on them and still normalizes whatever
//! it is given.

use crate::error::CoreError;

/// Maximum length of a scene number such as `"12A"`.
pub const MAX_SCENE_NUMBER_LEN: usize = 32;

/// Maximum length of a scene title.
pub const MAX_SCENE_TITLE_LEN: usize = 200;

/// Longest duration a single scene may declare (24 hours).
pub const MAX_SCENE_DURATION_MINS: i32 = 1440;

/// Validate a scene number: non-blank and at most [`MAX_SCENE_NUMBER_LEN`].
pub fn validate_scene_number(scene_number: &str) -> Result<(), CoreError> {
    validate_label("scene_number", scene_number, MAX_SCENE_NUMBER_LEN)
}

/// Validate a scene title: non-blank and at most [`MAX_SCENE_TITLE_LEN`].
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_label("title", title, MAX_SCENE_TITLE_LEN)
}

/// Validate an optional duration field in minutes.
///
/// Zero is allowed and means "not yet known".
pub fn validate_duration_minutes(field: &str, minutes: Option<i32>) -> Result<(), CoreError> {
    match minutes {
        Some(m) if !(0..=MAX_SCENE_DURATION_MINS).contains(&m) => {
            Err(CoreError::Validation(format!(
                "{field} must be between 0 and {MAX_SCENE_DURATION_MINS}, got {m}"
            )))
        }
        _ => Ok(()),
    }
}

fn validate_label(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters, got {len}"
        )));
    }
    Ok(())
}
