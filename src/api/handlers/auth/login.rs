//! Credential verification endpoint.

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
    storage::lookup_user_by_email,
    types::LoginRequest,
    utils::verify_password,
};

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse),
        (status = 400, description = "Invalid password", body = ApiResponse),
        (status = 404, description = "Unknown email", body = ApiResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let Some(Json(payload)) = payload else {
        return ApiError::Validation("Missing payload".to_string()).into_response();
    };

    let email = payload.email.trim().to_string();
    let password = payload.password;

    if email.is_empty() || password.is_empty() {
        return ApiError::Validation("All fields are required.".to_string()).into_response();
    }

    let user = match lookup_user_by_email(&pool, &email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return ApiError::NotFound("Email does not exist.".to_string()).into_response();
        }
        Err(err) => return ApiError::Internal(err).into_response(),
    };

    match verify_password(password, user.password_hash.clone()).await {
        Ok(true) => {}
        Ok(false) => {
            return ApiError::Auth("Invalid password.".to_string()).into_response();
        }
        Err(err) => return ApiError::Internal(err).into_response(),
    }

    let headers = match issue_session(&auth_state, user.id) {
        Ok(headers) => headers,
        Err(err) => return err.into_response(),
    };

    (
        StatusCode::OK,
        headers,
        Json(ApiResponse::message("Login successful.").with_user(user.into())),
    )
        .into_response()
}
