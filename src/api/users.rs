// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::{hash_password, verify_password, CurrentUser},
    error::ApiError,
    models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, User, UserResponse},
    state::AppState,
    store::{generate_public_id, CredentialStore},
};

const LOGIN_FAILED: &str = "email or password is incorrect.";

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/user/register",
    request_body = RegisterRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Registration succeeded", body = MessageResponse),
        (status = 400, description = "Password could not be processed"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = request.email.trim().to_string();
    if email.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let password_hash = hash_password(&request.password)?;
    let user = User {
        id: generate_public_id(),
        name: request.name.trim().to_string(),
        email,
        password_hash,
        rating: 0,
    };

    let user_id = user.id.clone();
    state.store.write().await.insert(user)?;
    tracing::info!(user_id = %user_id, "User registered");

    Ok(Json(MessageResponse {
        message: "registration success".to_string(),
    }))
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/user/login",
    request_body = LoginRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 400, description = "Email or password is incorrect"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let credential = state
        .store
        .read()
        .await
        .find_by_email(request.email.trim())
        .ok_or_else(|| ApiError::bad_request(LOGIN_FAILED))?;

    match verify_password(&request.password, &credential.password_hash) {
        Ok(true) => {}
        Ok(false) => return Err(ApiError::bad_request(LOGIN_FAILED)),
        Err(e) => {
            tracing::warn!(user_id = %credential.user_id, error = %e, "Stored password hash is unusable");
            return Err(ApiError::bad_request(LOGIN_FAILED));
        }
    }

    let token = state
        .tokens
        .issue(&credential.user_id, state.token_lifespan)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            ApiError::internal("Failed to issue token")
        })?;

    Ok(Json(LoginResponse { token }))
}

/// Get the current user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/user/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User information", body = UserResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "User no longer exists"),
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let store = state.store.read().await;
    let user = store
        .user(identity.user_id())
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete the current user with their events and join requests.
///
/// Tokens already issued to the user stay valid until they expire.
#[utoipa::path(
    delete,
    path = "/api/v1/user/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "User no longer exists"),
    )
)]
pub async fn delete_current_user(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.delete_user(identity.user_id())?;
    tracing::info!(user_id = %identity.user_id(), "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
