//! Route definitions for the `/auth` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST  /register          -> register
/// POST  /login             -> login
/// GET   /profile           -> profile (requires auth)
/// PATCH /profile           -> update_profile (requires auth)
/// PATCH /profile/password  -> update_password (requires auth)
/// POST  /profile/picture   -> upload_profile_picture (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profile", get(auth::profile).patch(auth::update_profile))
        .route("/profile/password", patch(auth::update_password))
        .route("/profile/picture", post(auth::upload_profile_picture))
}
