//! Listing attribute enums: category and condition.
//!
//! Both are stored as TEXT in the database (backed by check constraints)
//! and travel over the wire as their snake_case string forms. Serde handles
//! parsing at the API boundary, so an invalid value never reaches a query.

use serde::{Deserialize, Serialize};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Books,
    Electronics,
    Clothing,
    Furniture,
    Other,
}

impl Category {
    /// The database/wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Books => "books",
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Furniture => "furniture",
            Category::Other => "other",
        }
    }
}

/// Physical condition of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
}

impl Condition {
    /// The database/wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like_new",
            Condition::Good => "good",
            Condition::Fair => "fair",
        }
    }
}

/// Maximum number of images accepted when creating a listing.
pub const MAX_IMAGES_PER_LISTING: u64 = 3;

/// Minimum number of images required when creating a listing.
pub const MIN_IMAGES_PER_LISTING: u64 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        let parsed: Category = serde_json::from_str("\"books\"").expect("should parse");
        assert_eq!(parsed, Category::Books);
        assert_eq!(parsed.as_str(), "books");
    }

    #[test]
    fn test_condition_like_new_uses_snake_case() {
        let parsed: Condition = serde_json::from_str("\"like_new\"").expect("should parse");
        assert_eq!(parsed, Condition::LikeNew);
        assert_eq!(parsed.as_str(), "like_new");
    }

    #[test]
    fn test_invalid_category_rejected() {
        let result: Result<Category, _> = serde_json::from_str("\"vehicles\"");
        assert!(result.is_err());
    }
}
