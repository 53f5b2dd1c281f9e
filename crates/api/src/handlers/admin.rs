//! Handlers for the `/admin` resource (dashboard stats, user management).

use axum::extract::{Path, State};
use campusmarket_core::error::CoreError;
use campusmarket_core::roles::ROLE_ADMIN;
use campusmarket_core::types::DbId;
use campusmarket_db::models::user::UserResponse;
use campusmarket_db::repositories::{ProductRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Response body for `GET /admin/stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: i64,
    /// Approved and available listings.
    pub active_listings: i64,
    pub pending_listings: i64,
    pub banned_users: i64,
    pub new_users_this_week: i64,
    pub new_listings_this_week: i64,
}

/// GET /api/v1/admin/stats
///
/// Marketplace dashboard counters.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<StatsResponse>> {
    let week_ago = chrono::Utc::now() - chrono::Duration::days(7);

    let total_users = UserRepo::count_all(&state.pool).await?;
    let active_listings = ProductRepo::count_active(&state.pool).await?;
    let pending_listings = ProductRepo::count_pending(&state.pool).await?;
    let banned_users = UserRepo::count_banned(&state.pool).await?;
    let new_users_this_week = UserRepo::count_created_since(&state.pool, week_ago).await?;
    let new_listings_this_week = ProductRepo::count_created_since(&state.pool, week_ago).await?;

    Ok(Json(StatsResponse {
        total_users,
        active_listings,
        pending_listings,
        banned_users,
        new_users_this_week,
        new_listings_this_week,
    }))
}

/// GET /api/v1/admin/users
///
/// All non-admin accounts, newest first.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list_non_admin(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PATCH /api/v1/admin/users/{id}/ban
///
/// Ban a user account. Banned users can no longer log in; their existing
/// listings are untouched. Admin accounts cannot be banned.
pub async fn ban_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = set_ban(&state, id, true).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, "User banned");
    Ok(Json(user))
}

/// PATCH /api/v1/admin/users/{id}/unban
///
/// Lift a ban, restoring login access.
pub async fn unban_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = set_ban(&state, id, false).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, "User unbanned");
    Ok(Json(user))
}

/// Set the ban flag and return the updated account.
async fn set_ban(state: &AppState, id: DbId, banned: bool) -> AppResult<UserResponse> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "user", id })?;

    if banned && target.role == ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin accounts cannot be banned".into(),
        )));
    }

    UserRepo::set_banned(&state.pool, id, banned).await?;

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "user", id })?;
    Ok(user.into())
}
