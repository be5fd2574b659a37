use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 15)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 4)]
    pub total_pages: u64,
}

/// Normalize `page`/`per_page` query values: pages start at 1, page size is
/// clamped to `1..=100`.
pub fn page_window(page: Option<u64>, per_page: Option<u64>, default_per_page: u64) -> (u64, u64) {
    let page = Ord::max(page.unwrap_or(1), 1);
    let per_page = per_page.unwrap_or(default_per_page).clamp(1, 100);
    (page, per_page)
}

/// Lenient boolean for query strings: `1`, `true`, `on`, `yes` are true;
/// `0`, `false`, `off`, `no` and the empty string are false.
pub fn truthy_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None => Ok(None),
        Some(v) => parse_flag(v)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid boolean flag '{v}'"))),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "" | "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Validate a required free-text field (non-blank, at most `max` characters).
pub fn validate_required_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate a strictly positive dimension.
pub fn validate_dimension(field: &str, value: i32) -> Result<(), AppError> {
    if value <= 0 || value > 100_000 {
        return Err(AppError::Validation(format!(
            "{field} must be between 1 and 100000"
        )));
    }
    Ok(())
}
