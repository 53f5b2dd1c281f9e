//! Product entity model and DTOs.
//!
//! Read operations always join the seller's public profile, so the row
//! structs here come in two shapes: the bare `Product` used for ownership
//! checks, and `ProductWithSeller` with the joined `seller_*` columns.

use campusmarket_core::listing::{
    Category, Condition, MAX_IMAGES_PER_LISTING, MIN_IMAGES_PER_LISTING,
};
use campusmarket_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Bare product row from the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub condition: String,
    pub department: String,
    pub images: Vec<String>,
    pub seller_id: DbId,
    pub moderation_status: String,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product row joined with the seller's public columns (aliased `seller_*`).
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithSeller {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub condition: String,
    pub department: String,
    pub images: Vec<String>,
    pub seller_id: DbId,
    pub moderation_status: String,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub seller_email: String,
    pub seller_name: String,
    pub seller_department: String,
    pub seller_phone: Option<String>,
    pub seller_profile_picture: Option<String>,
    pub seller_role: String,
    pub seller_created_at: Timestamp,
    pub seller_updated_at: Timestamp,
}

/// Seller profile embedded in product responses. Never carries the
/// password hash or the ban flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfo {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub department: String,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire shape for a product, with the seller nested.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub condition: String,
    pub department: String,
    pub images: Vec<String>,
    pub seller_id: DbId,
    pub seller: SellerInfo,
    pub moderation_status: String,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProductWithSeller> for ProductResponse {
    fn from(row: ProductWithSeller) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            category: row.category,
            condition: row.condition,
            department: row.department,
            images: row.images,
            seller_id: row.seller_id,
            seller: SellerInfo {
                id: row.seller_id,
                email: row.seller_email,
                name: row.seller_name,
                department: row.seller_department,
                phone: row.seller_phone,
                profile_picture: row.seller_profile_picture,
                role: row.seller_role,
                created_at: row.seller_created_at,
                updated_at: row.seller_updated_at,
            },
            moderation_status: row.moderation_status,
            is_available: row.is_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a listing. Enum fields parse via serde, so an invalid
/// category or condition never reaches a query.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "price must be a non-negative number"))]
    pub price: f64,
    pub category: Category,
    pub condition: Condition,
    #[validate(length(min = 1, message = "department should not be empty"))]
    pub department: String,
    #[validate(length(
        min = MIN_IMAGES_PER_LISTING,
        max = MAX_IMAGES_PER_LISTING,
        message = "images must contain 1 to 3 references"
    ))]
    pub images: Vec<String>,
}

/// Typed patch for listing updates. Only present slots are applied.
/// `moderation_status` is deliberately absent: moderation goes through
/// the approve/reject operations only.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must be a non-negative number"))]
    pub price: Option<f64>,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    #[validate(length(min = 1, message = "department should not be empty"))]
    pub department: Option<String>,
    #[validate(length(
        min = MIN_IMAGES_PER_LISTING,
        max = MAX_IMAGES_PER_LISTING,
        message = "images must contain 1 to 3 references"
    ))]
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

/// Optional filters for the public feed, all AND-combined when present.
#[derive(Debug, Default)]
pub struct ProductFilters {
    pub category: Option<Category>,
    /// Case-insensitive substring match.
    pub department: Option<String>,
    /// Case-insensitive substring match on title OR description.
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}
