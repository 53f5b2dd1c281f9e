//! Shared test harness: builds the real application router against a test
//! database and provides request helpers driving it via `tower::ServiceExt`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use campusmarket_api::auth::jwt::JwtConfig;
use campusmarket_api::config::ServerConfig;
use campusmarket_api::router::build_app_router;
use campusmarket_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
///
/// Uploads land in a per-process temp subdirectory so upload tests never
/// touch the working tree.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        upload_dir: std::env::temp_dir().join(format!(
            "campusmarket-test-uploads-{}",
            std::process::id()
        )),
        jwt: JwtConfig {
            secret: "integration-test-secret-do-not-use-in-prod".to_string(),
            token_expiry_hours: 1,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This goes through the same [`build_app_router`] that `main.rs` uses, so
/// integration tests exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("PATCH")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
}

/// PATCH with no body (moderation endpoints take no payload).
pub async fn patch_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("PATCH")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
}

/// POST a hand-assembled multipart body (image upload endpoints).
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    boundary: &str,
    body: Vec<u8>,
    token: &str,
) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("request should build"),
    )
    .await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Account fixtures
// ---------------------------------------------------------------------------

/// Register an account through the API and return `(user_id, access_token)`.
pub async fn register_user(pool: &PgPool, email: &str, name: &str) -> (i64, String) {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "email": email,
        "password": "test-password-123",
        "name": name,
        "department": "Computer Science",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let user_id = json["user"]["id"].as_i64().expect("user id should be set");
    let token = json["accessToken"]
        .as_str()
        .expect("accessToken should be set")
        .to_string();
    (user_id, token)
}

/// Register an account, promote it to admin directly in the database, and
/// log in again so the token carries the admin role.
pub async fn register_admin(pool: &PgPool, email: &str) -> (i64, String) {
    let (user_id, _) = register_user(pool, email, "Admin").await;
    sqlx::query("UPDATE users SET role = 'admin' WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("promotion should succeed");

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "email": email, "password": "test-password-123" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["accessToken"]
        .as_str()
        .expect("accessToken should be set")
        .to_string();
    (user_id, token)
}

/// Create a listing through the API and return its id.
pub async fn create_listing(pool: &PgPool, token: &str, title: &str, price: f64) -> i64 {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "title": title,
        "description": format!("{title} in good shape"),
        "price": price,
        "category": "books",
        "condition": "good",
        "department": "Computer Science",
        "images": ["/uploads/products/test.jpg"],
    });
    let response = post_json_auth(app, "/api/v1/products", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_i64().expect("product id should be set")
}

/// Approve a listing as the given admin.
pub async fn approve_listing(pool: &PgPool, admin_token: &str, id: i64) {
    let app = build_test_app(pool.clone());
    let response = patch_auth(app, &format!("/api/v1/products/{id}/approve"), admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
