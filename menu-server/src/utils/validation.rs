//! Input validation helpers
//!
//! Length limits for catalog text; SQLite TEXT has no built-in length
//! enforcement.

use shared::LocalizedText;

use crate::utils::AppError;

/// Category and dish names (per language)
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions (per language)
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Image paths / URLs
pub const MAX_URL_LEN: usize = 2048;

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Every translation within the limit
pub fn validate_localized(
    value: &LocalizedText,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    for lang in shared::Lang::ALL {
        let text = value.get(lang);
        if text.chars().count() > max_len {
            return Err(AppError::validation(format!(
                "{field}_{lang} is too long ({} chars, max {max_len})",
                text.chars().count()
            )));
        }
    }
    Ok(())
}

/// Positions are displayed in ascending order and must not be negative
pub fn validate_position(value: Option<i32>, field: &str) -> Result<(), AppError> {
    if let Some(v) = value
        && v < 0
    {
        return Err(AppError::validation(format!("{field} must not be negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "image", 5).is_ok());
        assert!(validate_optional_text(&Some("abcde".into()), "image", 5).is_ok());
        assert!(validate_optional_text(&Some("abcdef".into()), "image", 5).is_err());
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // 5 Cyrillic chars are 10 bytes
        let name = LocalizedText::from_parts("Палау", "", "");
        assert!(validate_localized(&name, "name", 5).is_ok());
        assert!(validate_localized(&name, "name", 4).is_err());
    }

    #[test]
    fn test_position() {
        assert!(validate_position(Some(0), "position").is_ok());
        assert!(validate_position(None, "position").is_ok());
        let err = validate_position(Some(-1), "nav_position").unwrap_err();
        assert!(err.message.contains("nav_position"));
    }
}
