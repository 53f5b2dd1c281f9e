//! Repository for the `products` table.
//!
//! Read operations join the seller's public profile columns; the feed query
//! keeps a single static SQL text and passes absent filters as NULL binds,
//! so field names are never assembled from request input.

use campusmarket_core::moderation::ModerationStatus;
use campusmarket_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::product::{
    CreateProduct, Product, ProductFilters, ProductWithSeller, UpdateProduct,
};

/// Bare product column list.
const COLUMNS: &str = "p.id, p.title, p.description, p.price, p.category, p.condition, \
                        p.department, p.images, p.seller_id, p.moderation_status, \
                        p.is_available, p.created_at, p.updated_at";

/// Joined seller columns, aliased to the `seller_*` row fields.
const SELLER_COLUMNS: &str = "u.email AS seller_email, u.name AS seller_name, \
                               u.department AS seller_department, u.phone AS seller_phone, \
                               u.profile_picture AS seller_profile_picture, \
                               u.role AS seller_role, u.created_at AS seller_created_at, \
                               u.updated_at AS seller_updated_at";

/// Public-feed predicate with optional filter binds.
///
/// Binds: $1 category, $2 department contains, $3 search contains,
/// $4 min price, $5 max price. A NULL bind disables its clause.
const FEED_PREDICATE: &str = "p.is_available = TRUE AND p.moderation_status = 'approved' \
     AND ($1::text IS NULL OR p.category = $1) \
     AND ($2::text IS NULL OR p.department ILIKE '%' || $2 || '%') \
     AND ($3::text IS NULL OR p.title ILIKE '%' || $3 || '%' \
          OR p.description ILIKE '%' || $3 || '%') \
     AND ($4::float8 IS NULL OR p.price >= $4) \
     AND ($5::float8 IS NULL OR p.price <= $5)";

/// Provides CRUD and moderation operations for product listings.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new listing for the given seller.
    ///
    /// Moderation status and availability are left to their column defaults
    /// (`pending`, `true`) regardless of the caller's role.
    pub async fn create(
        pool: &PgPool,
        seller_id: DbId,
        input: &CreateProduct,
    ) -> Result<ProductWithSeller, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO products (title, description, price, category, condition, department, images, seller_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.category.as_str())
        .bind(input.condition.as_str())
        .bind(&input.department)
        .bind(&input.images)
        .bind(seller_id)
        .fetch_one(pool)
        .await?;

        tracing::debug!(product_id = id, seller_id, "Inserted product row");
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a listing by ID, joined with seller info.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductWithSeller>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {SELLER_COLUMNS}
             FROM products p
             INNER JOIN users u ON u.id = p.seller_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProductWithSeller>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the bare row, without the seller join (ownership checks).
    pub async fn find_basic(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = "SELECT id, title, description, price, category, condition, department, \
                     images, seller_id, moderation_status, is_available, created_at, updated_at \
                     FROM products WHERE id = $1";
        sqlx::query_as::<_, Product>(query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a listing patch. Only non-`None` slots are applied; the
    /// moderation status cannot be set through this path.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<ProductWithSeller>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE products SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                condition = COALESCE($6, condition),
                department = COALESCE($7, department),
                images = COALESCE($8, images),
                is_available = COALESCE($9, is_available),
                updated_at = NOW()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.category.map(|c| c.as_str()))
        .bind(input.condition.map(|c| c.as_str()))
        .bind(&input.department)
        .bind(&input.images)
        .bind(input.is_available)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Hard-delete a listing. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        tracing::debug!(product_id = id, "Deleted product row");
        Ok(result.rows_affected() > 0)
    }

    /// Write a moderation transition in a single UPDATE.
    ///
    /// Rejection forces `is_available = false` in the same statement, so no
    /// intermediate state (rejected but still available) is ever observable.
    pub async fn set_moderation_status(
        pool: &PgPool,
        id: DbId,
        status: ModerationStatus,
    ) -> Result<Option<ProductWithSeller>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE products SET
                moderation_status = $2,
                is_available = CASE WHEN $3 THEN FALSE ELSE is_available END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(status.forces_unavailable())
        .fetch_optional(pool)
        .await?;

        tracing::debug!(product_id = id, status = status.as_str(), "Wrote moderation status");
        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Public feed: approved + available listings matching the filters.
    ///
    /// Returns one page (newest first, id descending as tie-break) plus the
    /// total count matching the filters before pagination.
    pub async fn list_approved(
        pool: &PgPool,
        filters: &ProductFilters,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ProductWithSeller>, i64), sqlx::Error> {
        let category = filters.category.map(|c| c.as_str());
        // Saturate so an absurd page number yields an empty page, not an
        // overflow or a negative OFFSET.
        let offset = page.saturating_sub(1).saturating_mul(limit);

        let count_query = format!("SELECT COUNT(*) FROM products p WHERE {FEED_PREDICATE}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(category)
            .bind(&filters.department)
            .bind(&filters.search)
            .bind(filters.min_price)
            .bind(filters.max_price)
            .fetch_one(pool)
            .await?;

        let list_query = format!(
            "SELECT {COLUMNS}, {SELLER_COLUMNS}
             FROM products p
             INNER JOIN users u ON u.id = p.seller_id
             WHERE {FEED_PREDICATE}
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $6 OFFSET $7"
        );
        let rows = sqlx::query_as::<_, ProductWithSeller>(&list_query)
            .bind(category)
            .bind(&filters.department)
            .bind(&filters.search)
            .bind(filters.min_price)
            .bind(filters.max_price)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// All pending listings, newest first, unpaginated (moderation queue).
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<ProductWithSeller>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {SELLER_COLUMNS}
             FROM products p
             INNER JOIN users u ON u.id = p.seller_id
             WHERE p.moderation_status = 'pending'
             ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, ProductWithSeller>(&query)
            .fetch_all(pool)
            .await
    }

    /// Number of approved, available listings (admin dashboard).
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products
             WHERE moderation_status = 'approved' AND is_available = TRUE",
        )
        .fetch_one(pool)
        .await
    }

    /// Number of listings awaiting moderation.
    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE moderation_status = 'pending'",
        )
        .fetch_one(pool)
        .await
    }

    /// Number of listings created at or after the given instant.
    pub async fn count_created_since(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE created_at >= $1")
            .bind(since)
            .fetch_one(pool)
            .await
    }
}
