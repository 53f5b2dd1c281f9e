//! Pagination envelope and page math for listing feeds.

use serde::Serialize;

/// Default page size for the public feed.
pub const DEFAULT_LIMIT: i64 = 20;

/// Upper bound on page size to keep feed queries cheap.
pub const MAX_LIMIT: i64 = 100;

/// Paginated response envelope: `{data, total, page, limit, totalPages}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    /// Count of rows matching the filters before pagination.
    pub total: i64,
    /// 1-indexed page number.
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T: Serialize> Paginated<T> {
    /// Assemble an envelope, deriving `totalPages = ceil(total / limit)`.
    pub fn new(data: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        Self {
            data,
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        }
    }
}

/// `ceil(total / limit)`; zero rows means zero pages.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Clamp a requested page number to the valid 1-indexed range.
pub fn normalize_page(page: Option<i64>) -> i64 {
    page.filter(|p| *p >= 1).unwrap_or(1)
}

/// Clamp a requested limit to `1..=MAX_LIMIT`, defaulting to [`DEFAULT_LIMIT`].
pub fn normalize_limit(limit: Option<i64>) -> i64 {
    limit
        .filter(|l| *l >= 1)
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT)
}
