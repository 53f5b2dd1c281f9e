//! Route definitions for the `/products` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /              -> feed (public)
/// POST   /              -> create (requires auth)
/// POST   /images        -> upload_images (requires auth)
/// GET    /pending       -> pending (admin)
/// GET    /{id}          -> get_by_id (public)
/// PATCH  /{id}          -> update (owner or admin)
/// DELETE /{id}          -> delete (owner or admin)
/// PATCH  /{id}/approve  -> approve (admin)
/// PATCH  /{id}/reject   -> reject (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::feed).post(products::create))
        .route("/images", post(products::upload_images))
        .route("/pending", get(products::pending))
        .route(
            "/{id}",
            get(products::get_by_id)
                .patch(products::update)
                .delete(products::delete),
        )
        .route("/{id}/approve", patch(products::approve))
        .route("/{id}/reject", patch(products::reject))
}
