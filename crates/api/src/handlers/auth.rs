//! Handlers for the `/auth` resource (register, login, profile management).

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use campusmarket_core::error::CoreError;
use campusmarket_db::models::user::{CreateUser, UpdateProfile, UserResponse};
use campusmarket_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::handlers::uploads::save_image_field;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "department should not be empty"))]
    pub department: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `PATCH /auth/profile/password`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
}

/// Plain confirmation message body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account with the default `user` role and return it with a
/// fresh access token. Returns 409 if the email is already registered.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash,
            name: input.name,
            department: input.department,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            access_token,
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Banned accounts are refused with 403
/// before the password is even checked.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid email or password".into())))?;

    if user.is_banned {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is banned".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)?;
    Ok(Json(AuthResponse {
        user: user.into(),
        access_token,
    }))
}

/// GET /api/v1/auth/profile
///
/// Return the authenticated user's own profile.
pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/auth/profile
///
/// Partial profile update. An empty patch is rejected; changing the email
/// to one held by another account returns 409.
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields provided to update".into()));
    }

    if let Some(email) = &input.email {
        if UserRepo::email_taken_by_other(&state.pool, email, auth_user.user_id).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "Email already registered".into(),
            )));
        }
    }

    let user = UserRepo::update_profile(&state.pool, auth_user.user_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/auth/profile/password
///
/// Change the password after verifying the current one.
pub async fn update_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdatePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let new_hash = hash_password(&input.new_password)?;
    UserRepo::update_password(&state.pool, user.id, &new_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(Json(MessageResponse {
        message: "Password updated successfully".into(),
    }))
}

/// POST /api/v1/auth/profile/picture
///
/// Upload a profile picture (multipart, single image field). Replaces any
/// previous picture reference and returns the updated profile.
pub async fn upload_profile_picture(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<UserResponse>> {
    let field = multipart
        .next_field()
        .await?
        .ok_or_else(|| AppError::BadRequest("No file provided".into()))?;

    let prefix = format!("profile-{}", auth_user.user_id);
    let path = save_image_field(field, &state.config.upload_dir, "profiles", &prefix).await?;

    let user = UserRepo::update_profile_picture(&state.pool, auth_user.user_id, &path)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    tracing::info!(user_id = user.id, "Profile picture updated");
    Ok(Json(user.into()))
}
