//! Shared query parameter types for API handlers.

use campusmarket_core::listing::Category;
use campusmarket_core::pagination::{normalize_limit, normalize_page};
use campusmarket_db::models::product::ProductFilters;
use serde::Deserialize;

/// Query parameters for the public product feed
/// (`?page=&limit=&category=&department=&search=&minPrice=&maxPrice=`).
///
/// All parameters are optional. Page/limit are normalized via the shared
/// pagination helpers; filter fields are passed through to the repository
/// as-is, where `None` disables the corresponding predicate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<Category>,
    pub department: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl FeedParams {
    /// The 1-indexed page to fetch (defaults to 1, floors at 1).
    pub fn page(&self) -> i64 {
        normalize_page(self.page)
    }

    /// The page size (defaults to 20, capped at 100, floors at 1).
    pub fn limit(&self) -> i64 {
        normalize_limit(self.limit)
    }

    /// The repository-level filter set, with empty strings treated as absent.
    pub fn filters(&self) -> ProductFilters {
        ProductFilters {
            category: self.category,
            department: non_empty(&self.department),
            search: non_empty(&self.search),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
