//! Project field rules.
//!
//! Inputs are trimmed by the caller (see [`trim_field`]) before validation,
//! so every check here operates on the value that will be stored.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length of a project name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a project description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Color applied when a project is created without one.
pub const DEFAULT_COLOR: &str = "#3B82F6";

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid regex"));

/// Trim surrounding whitespace from a user-supplied text field.
pub fn trim_field(value: &str) -> String {
    value.trim().to_string()
}

/// Returns `true` if `color` is `#` followed by exactly six hex digits.
pub fn is_valid_hex_color(color: &str) -> bool {
    HEX_COLOR_RE.is_match(color)
}

/// Pick the stored color for a new project: the trimmed input, or
/// [`DEFAULT_COLOR`] when absent or blank.
pub fn color_or_default(color: Option<&str>) -> String {
    match color.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_COLOR.to_string(),
    }
}

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Project name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Project name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description cannot exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_color(color: &str) -> Result<(), CoreError> {
    if !is_valid_hex_color(color) {
        return Err(CoreError::Validation(
            "Color must be a valid hex color".to_string(),
        ));
    }
    Ok(())
}
