//! Route definitions for the `/admin` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All admin only.
///
/// ```text
/// GET   /stats             -> stats
/// GET   /users             -> list_users
/// PATCH /users/{id}/ban    -> ban_user
/// PATCH /users/{id}/unban  -> unban_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/ban", patch(admin::ban_user))
        .route("/users/{id}/unban", patch(admin::unban_user))
}
