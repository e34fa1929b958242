//! User registration endpoint.

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::api::response::{ApiError, ApiResponse};

use super::{
    session::issue_session,
    state::AuthState,
    storage::{SignupOutcome, insert_user},
    types::SignupRequest,
    utils::{PASSWORD_MIN_LENGTH, hash_password, valid_email},
};

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse),
        (status = 400, description = "Validation error or duplicate email", body = ApiResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<SignupRequest>>,
) -> impl IntoResponse {
    let Some(Json(payload)) = payload else {
        return ApiError::Validation("Missing payload".to_string()).into_response();
    };

    let email = payload.email.trim().to_string();
    let name = payload.name.trim().to_string();
    let password = payload.password;

    if email.is_empty() || name.is_empty() || password.is_empty() {
        return ApiError::Validation("All fields are required.".to_string()).into_response();
    }

    if !valid_email(&email) {
        return ApiError::Validation("Invalid email address.".to_string()).into_response();
    }

    if password.len() < PASSWORD_MIN_LENGTH {
        return ApiError::Validation(format!(
            "Password must be at least {PASSWORD_MIN_LENGTH} characters."
        ))
        .into_response();
    }

    let password_hash = match hash_password(password).await {
        Ok(hash) => hash,
        Err(err) => return ApiError::Internal(err).into_response(),
    };

    let user = match insert_user(&pool, &email, &password_hash, &name).await {
        Ok(SignupOutcome::Created(user)) => user,
        Ok(SignupOutcome::Conflict) => {
            return ApiError::Conflict("Email already exists.".to_string()).into_response();
        }
        Err(err) => return ApiError::Internal(err).into_response(),
    };

    // The write is confirmed at this point; only now may a session exist.
    let headers = match issue_session(&auth_state, user.id) {
        Ok(headers) => headers,
        Err(err) => return err.into_response(),
    };

    (
        StatusCode::CREATED,
        headers,
        Json(ApiResponse::message("User created successfully.").with_user(user.into())),
    )
        .into_response()
}
