//! HTTP-level integration tests for listing CRUD, ownership enforcement,
//! and the listing image upload endpoint.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_listing, delete_auth, get, patch_json_auth, post_json_auth,
    post_multipart_auth, register_admin, register_user,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// A new listing starts pending and available, with the seller nested in
/// the response and no sensitive seller fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_listing(pool: PgPool) {
    let (user_id, token) = register_user(&pool, "seller@campus.edu", "Seller").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "title": "Calculus Textbook",
        "description": "Barely used",
        "price": 25.5,
        "category": "books",
        "condition": "like_new",
        "department": "Mathematics",
        "images": ["/uploads/products/a.jpg", "/uploads/products/b.jpg"],
    });
    let response = post_json_auth(app, "/api/v1/products", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Calculus Textbook");
    assert_eq!(json["price"], 25.5);
    assert_eq!(json["category"], "books");
    assert_eq!(json["condition"], "like_new");
    assert_eq!(json["moderationStatus"], "pending");
    assert_eq!(json["isAvailable"], true);
    assert_eq!(json["sellerId"], user_id);
    assert_eq!(json["seller"]["id"], user_id);
    assert_eq!(json["seller"]["email"], "seller@campus.edu");
    assert!(
        json["seller"].get("passwordHash").is_none() && json["seller"].get("isBanned").is_none(),
        "seller info must not leak sensitive fields"
    );
}

/// Admins get no shortcut: their listings also start pending.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_listing_also_starts_pending(pool: PgPool) {
    let (_, admin_token) = register_admin(&pool, "admin@campus.edu").await;
    let id = create_listing(&pool, &admin_token, "Admin Chair", 40.0).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/products/{id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["moderationStatus"], "pending");
}

/// Creating a listing requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "title": "No Auth",
        "description": "x",
        "price": 1.0,
        "category": "other",
        "condition": "fair",
        "department": "None",
        "images": ["/uploads/products/x.jpg"],
    });
    let response = common::post_json(app, "/api/v1/products", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Negative prices and empty image lists are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_validation(pool: PgPool) {
    let (_, token) = register_user(&pool, "validator@campus.edu", "Val").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "title": "Bad Price",
        "description": "x",
        "price": -5.0,
        "category": "books",
        "condition": "good",
        "department": "Math",
        "images": ["/uploads/products/x.jpg"],
    });
    let response = post_json_auth(app, "/api/v1/products", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "title": "No Images",
        "description": "x",
        "price": 5.0,
        "category": "books",
        "condition": "good",
        "department": "Math",
        "images": [],
    });
    let response = post_json_auth(app, "/api/v1/products", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // An unknown category never reaches the database.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "title": "Bad Category",
        "description": "x",
        "price": 5.0,
        "category": "vehicles",
        "condition": "good",
        "department": "Math",
        "images": ["/uploads/products/x.jpg"],
    });
    let response = post_json_auth(app, "/api/v1/products", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["statusCode"], 400);
    assert!(json["message"].is_string());
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Fetching an unknown id returns 404 with the standard error body.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_unknown_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/products/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["statusCode"], 404);
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

/// Only the owner (or an admin) may update a listing; a stranger gets 403
/// and the record is unchanged.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_by_non_owner_forbidden(pool: PgPool) {
    let (_, owner_token) = register_user(&pool, "owner@campus.edu", "Owner").await;
    let (_, stranger_token) = register_user(&pool, "stranger@campus.edu", "Stranger").await;
    let id = create_listing(&pool, &owner_token, "Owned Lamp", 10.0).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Hijacked" });
    let response = patch_json_auth(app, &format!("/api/v1/products/{id}"), body, &stranger_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/products/{id}")).await).await;
    assert_eq!(json["title"], "Owned Lamp", "failed update must not change the row");
}

/// The owner can patch their own listing; absent fields survive.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_by_owner(pool: PgPool) {
    let (_, token) = register_user(&pool, "patcher@campus.edu", "Patcher").await;
    let id = create_listing(&pool, &token, "Old Desk", 30.0).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "price": 22.0, "isAvailable": false });
    let response = patch_json_auth(app, &format!("/api/v1/products/{id}"), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["price"], 22.0);
    assert_eq!(json["isAvailable"], false);
    assert_eq!(json["title"], "Old Desk");
}

/// A `moderationStatus` field smuggled into an update is ignored.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_cannot_touch_moderation_status(pool: PgPool) {
    let (_, token) = register_user(&pool, "sneaky@campus.edu", "Sneaky").await;
    let id = create_listing(&pool, &token, "Sneaky Sofa", 80.0).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "moderationStatus": "approved", "title": "Still Sneaky" });
    let response = patch_json_auth(app, &format!("/api/v1/products/{id}"), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Still Sneaky");
    assert_eq!(json["moderationStatus"], "pending", "self-approval must be impossible");
}

/// An admin may update someone else's listing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_can_update_any_listing(pool: PgPool) {
    let (_, owner_token) = register_user(&pool, "owned@campus.edu", "Owned").await;
    let (_, admin_token) = register_admin(&pool, "moderator@campus.edu").await;
    let id = create_listing(&pool, &owner_token, "Communal Bike", 55.0).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "title": "Communal Bike (checked)" });
    let response = patch_json_auth(app, &format!("/api/v1/products/{id}"), body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Deletion follows the same ownership rule and returns 204.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_listing(pool: PgPool) {
    let (_, owner_token) = register_user(&pool, "deleter@campus.edu", "Deleter").await;
    let (_, stranger_token) = register_user(&pool, "nosy@campus.edu", "Nosy").await;
    let id = create_listing(&pool, &owner_token, "Doomed Shelf", 12.0).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/products/{id}"), &stranger_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/products/{id}"), &owner_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Image upload
// ---------------------------------------------------------------------------

/// Assemble a single-file multipart body.
fn multipart_file(boundary: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"images\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

/// Uploading a PNG stores it and returns its URL path.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_listing_image(pool: PgPool) {
    let (_, token) = register_user(&pool, "uploader@campus.edu", "Uploader").await;

    let boundary = "test-boundary-7f3a";
    let body = multipart_file(boundary, "chair.png", "image/png", b"fake png bytes");

    let app = common::build_test_app(pool);
    let response = post_multipart_auth(app, "/api/v1/products/images", boundary, body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let images = json["images"].as_array().expect("images should be an array");
    assert_eq!(images.len(), 1);
    let path = images[0].as_str().unwrap();
    assert!(path.starts_with("/uploads/products/"), "got: {path}");
    assert!(path.ends_with(".png"));
}

/// Non-image uploads are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_rejects_non_image(pool: PgPool) {
    let (_, token) = register_user(&pool, "pdfguy@campus.edu", "PdfGuy").await;

    let boundary = "test-boundary-9c1d";
    let body = multipart_file(boundary, "cv.pdf", "application/pdf", b"%PDF-1.4");

    let app = common::build_test_app(pool);
    let response = post_multipart_auth(app, "/api/v1/products/images", boundary, body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Upload requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_requires_auth(pool: PgPool) {
    let boundary = "test-boundary-2b8e";
    let body = multipart_file(boundary, "a.png", "image/png", b"data");

    let app = common::build_test_app(pool);
    let response = post_multipart_auth(app, "/api/v1/products/images", boundary, body, "bad-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
