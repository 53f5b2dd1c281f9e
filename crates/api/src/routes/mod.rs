//! Route registration for all API resources.

pub mod admin;
pub mod auth;
pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// All resource routes, mounted under `/api/v1` by the router builder.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/admin", admin::router())
}
