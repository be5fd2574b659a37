use axum::{Json, extract::State};
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::payload::AppJson;
use crate::handlers::auth::email_conflict;
use crate::models::user::{UpdateUserRequest, UserResponse, validate_update_user};
use crate::state::AppState;
use crate::utils::hash;

#[utoipa::path(
    get,
    path = "/",
    tag = "User",
    operation_id = "getCurrentUser",
    summary = "Get the authenticated user's profile",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Account no longer exists (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/",
    tag = "User",
    operation_id = "replaceCurrentUser",
    summary = "Update the authenticated user's profile",
    description = "Same as the PATCH variant.",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Email already registered (EMAIL_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
pub async fn replace_user(
    auth_user: AuthUser,
    state: State<AppState>,
    payload: AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    update_user(auth_user, state, payload).await
}

#[utoipa::path(
    patch,
    path = "/",
    tag = "User",
    operation_id = "updateCurrentUser",
    summary = "Update the authenticated user's profile",
    description = "Updates `name`, `email` and `country_code` when present. A non-empty `password` is re-hashed and replaces the current one.",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Email already registered (EMAIL_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn update_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    validate_update_user(&payload)?;

    let password_hash = payload
        .new_password()
        .map(hash::hash_password)
        .transpose()
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let txn = state.db.begin().await?;

    let existing = user::Entity::find_by_id(auth_user.user_id)
        .lock(sea_orm::sea_query::LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let mut active: user::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = payload.email {
        active.email = Set(email.trim().to_lowercase());
    }
    if let Some(code) = payload.country_code {
        active.country_code = Set(Some(code.to_ascii_uppercase()));
    }
    let password_changed = password_hash.is_some();
    if let Some(hash) = password_hash {
        active.password = Set(hash);
    }
    active.updated_at = Set(chrono::Utc::now());

    let updated = active.update(&txn).await.map_err(email_conflict)?;
    txn.commit().await?;

    info!(password_changed, "User profile updated");
    Ok(Json(updated.into()))
}
