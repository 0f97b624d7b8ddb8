use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::AppError;

/// Default page size for paginated lists.
pub const DEFAULT_PAGE_SIZE: u64 = 6;
/// Largest accepted `limit`.
pub const MAX_PAGE_SIZE: u64 = 200;

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 6)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 8)]
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        Self {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }
}

/// `page` / `limit` query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number (default: 1).
    pub page: Option<u64>,
    /// Items per page (default: 6, max: 200).
    pub limit: Option<u64>,
}

/// Resolve optional `page` / `limit` values into `(page, per_page)`.
///
/// `page` is capped so that the row offset fits in a Postgres `bigint`.
pub fn page_bounds(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let per_page = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let last_page = i64::MAX as u64 / per_page + 1;
    let page = page.unwrap_or(1).clamp(1, last_page);
    (page, per_page)
}

/// Row offset of the first item on `page`.
pub fn page_offset(page: u64, per_page: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(per_page)
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Validate an ID list (non-empty, no duplicates).
pub fn validate_unique_ids(ids: &[i32], name: &str) -> Result<(), AppError> {
    if ids.is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }
    let mut seen = HashSet::new();
    for &id in ids {
        if !seen.insert(id) {
            return Err(AppError::Validation(format!("Duplicate {name} ID: {id}")));
        }
    }
    Ok(())
}

/// Validate a trimmed string length in Unicode characters.
pub fn validate_length(value: &str, field: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}
