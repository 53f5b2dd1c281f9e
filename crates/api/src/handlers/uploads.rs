//! Multipart image persistence shared by the profile-picture and
//! listing-image endpoints.
//!
//! Files land under the configured upload root, split by kind
//! (`profiles/`, `products/`). The returned reference is the URL path the
//! static file service exposes, never a filesystem path, and the stored
//! file name is always server-generated (a UUID), so client-supplied
//! names never touch the disk.

use std::path::Path;

use axum::extract::multipart::Field;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Maximum accepted size for one uploaded image.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Maximum number of files accepted by the listing-image upload endpoint.
pub const MAX_LISTING_IMAGES: usize = 5;

/// Map an image content type to the stored file extension.
///
/// Returns `None` for anything that is not an accepted image type.
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Validate and persist one multipart image field.
///
/// Returns the URL path (`/uploads/<subdir>/<name>`) under which the static
/// file service will serve the stored file.
pub async fn save_image_field(
    field: Field<'_>,
    upload_root: &Path,
    subdir: &str,
    prefix: &str,
) -> AppResult<String> {
    let content_type = field
        .content_type()
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("Uploaded file is missing a content type".into()))?;

    let ext = extension_for(&content_type).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unsupported image type '{content_type}'. Allowed: jpeg, png, gif, webp"
        ))
    })?;

    let data = field.bytes().await?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(
            "File too large. Maximum size is 5MB".into(),
        ));
    }

    let file_name = format!("{prefix}-{}.{ext}", Uuid::new_v4());
    let dir = upload_root.join(subdir);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(&file_name), &data).await?;

    tracing::debug!(file = %file_name, bytes = data.len(), "Stored uploaded image");
    Ok(format!("/uploads/{subdir}/{file_name}"))
}
