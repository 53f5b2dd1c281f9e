//! Handlers for the `/products` resource (feed, CRUD, moderation, images).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use campusmarket_core::authorization::AuthorizationPolicy;
use campusmarket_core::error::CoreError;
use campusmarket_core::moderation::{ModerationAction, ModerationStatus};
use campusmarket_core::pagination::Paginated;
use campusmarket_core::types::DbId;
use campusmarket_db::models::product::{CreateProduct, ProductResponse, UpdateProduct};
use campusmarket_db::repositories::ProductRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Query};
use crate::handlers::uploads::{save_image_field, MAX_LISTING_IMAGES};
use crate::middleware::auth::AuthUser;
use crate::query::FeedParams;
use crate::state::AppState;

/// Response body for `POST /products/images`.
#[derive(Debug, Serialize)]
pub struct UploadImagesResponse {
    /// URL paths of the stored files, in upload order.
    pub images: Vec<String>,
}

/// POST /api/v1/products
///
/// Create a listing for the authenticated user. Every new listing starts
/// `pending` and invisible to the public feed, regardless of the caller's
/// role.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    input.validate()?;
    let product = ProductRepo::create(&state.pool, auth_user.user_id, &input).await?;
    tracing::info!(
        product_id = product.id,
        seller_id = auth_user.user_id,
        "Listing created"
    );
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /api/v1/products
///
/// Public feed: approved, available listings matching the optional filters,
/// newest first, paginated.
pub async fn feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> AppResult<Json<Paginated<ProductResponse>>> {
    let page = params.page();
    let limit = params.limit();
    let filters = params.filters();

    let (rows, total) = ProductRepo::list_approved(&state.pool, &filters, page, limit).await?;
    let data: Vec<ProductResponse> = rows.into_iter().map(ProductResponse::from).collect();
    Ok(Json(Paginated::new(data, total, page, limit)))
}

/// GET /api/v1/products/{id}
///
/// Fetch a single listing with seller info. Not filtered by moderation
/// status: direct links keep working for the seller while the listing is
/// pending.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductResponse>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id,
        })?;
    Ok(Json(product.into()))
}

/// PATCH /api/v1/products/{id}
///
/// Partial listing update by the owner or an admin. The moderation status
/// is not reachable through this path.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<ProductResponse>> {
    input.validate()?;

    let existing = ProductRepo::find_basic(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id,
        })?;

    if !AuthorizationPolicy::can_mutate_listing(auth_user.user_id, &auth_user.role, existing.seller_id)
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only modify your own listings".into(),
        )));
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id,
        })?;
    Ok(Json(product.into()))
}

/// DELETE /api/v1/products/{id}
///
/// Remove a listing (owner or admin). Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = ProductRepo::find_basic(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id,
        })?;

    if !AuthorizationPolicy::can_mutate_listing(auth_user.user_id, &auth_user.role, existing.seller_id)
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only modify your own listings".into(),
        )));
    }

    ProductRepo::delete(&state.pool, id).await?;
    tracing::info!(product_id = id, user_id = auth_user.user_id, "Listing deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/products/pending
///
/// The moderation queue: all pending listings, newest first. Gated by the
/// authorization policy, admin only.
pub async fn pending(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<ProductResponse>>> {
    if !AuthorizationPolicy::can_view_pending(&auth_user.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required".into(),
        )));
    }
    let rows = ProductRepo::list_pending(&state.pool).await?;
    Ok(Json(rows.into_iter().map(ProductResponse::from).collect()))
}

/// PATCH /api/v1/products/{id}/approve
///
/// Approve a pending listing, making it eligible for the public feed.
/// Approving an already approved listing is a no-op.
pub async fn approve(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductResponse>> {
    moderate(&state, &auth_user, id, ModerationAction::Approve).await
}

/// PATCH /api/v1/products/{id}/reject
///
/// Reject a pending listing. Rejection also marks the listing unavailable,
/// in the same statement.
pub async fn reject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductResponse>> {
    moderate(&state, &auth_user, id, ModerationAction::Reject).await
}

/// POST /api/v1/products/images
///
/// Store up to [`MAX_LISTING_IMAGES`] images for later use in a listing's
/// `images` array. Returns the stored URL paths in upload order.
pub async fn upload_images(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadImagesResponse>> {
    let mut images = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if images.len() >= MAX_LISTING_IMAGES {
            return Err(AppError::BadRequest(format!(
                "Too many files. Maximum is {MAX_LISTING_IMAGES} images per upload"
            )));
        }
        let prefix = format!("product-{}", auth_user.user_id);
        let path = save_image_field(field, &state.config.upload_dir, "products", &prefix).await?;
        images.push(path);
    }

    if images.is_empty() {
        return Err(AppError::BadRequest("No files provided".into()));
    }
    Ok(Json(UploadImagesResponse { images }))
}

/// Shared moderation flow for approve/reject.
///
/// Existence is checked before authorization, so a missing id yields 404
/// for any authenticated caller. Re-applying the decision that produced
/// the current state returns the listing unchanged.
async fn moderate(
    state: &AppState,
    auth_user: &AuthUser,
    id: DbId,
    action: ModerationAction,
) -> AppResult<Json<ProductResponse>> {
    let existing = ProductRepo::find_basic(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id,
        })?;

    if !AuthorizationPolicy::can_moderate(&auth_user.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required".into(),
        )));
    }

    let current = ModerationStatus::parse(&existing.moderation_status)?;
    let next = current.apply(action)?;

    if next == current {
        let product = ProductRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "product",
                id,
            })?;
        return Ok(Json(product.into()));
    }

    let product = ProductRepo::set_moderation_status(&state.pool, id, next)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id,
        })?;

    tracing::info!(
        product_id = id,
        status = next.as_str(),
        moderator_id = auth_user.user_id,
        "Moderation decision applied"
    );
    Ok(Json(product.into()))
}
