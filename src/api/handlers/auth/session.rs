//! Session cookie plumbing plus the logout and session-restore endpoints.

use anyhow::anyhow;
use axum::{
    Json,
    extract::Extension,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{COOKIE, InvalidHeaderValue, SET_COOKIE},
    },
    response::IntoResponse,
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::response::{ApiError, ApiResponse};
use crate::token::{SessionTokenClaims, sign_hs256};

use super::{
    principal::require_auth,
    state::{AuthConfig, AuthState},
    types::UserBody,
    utils::now_unix_seconds,
};
use secrecy::ExposeSecret;

const SESSION_COOKIE_NAME: &str = "resep_session";

/// Sign a fresh session token for a persisted user and wrap it in a
/// `Set-Cookie` header. Callers must only invoke this after the user row is
/// confirmed written.
pub(super) fn issue_session(auth_state: &AuthState, user_id: Uuid) -> Result<HeaderMap, ApiError> {
    let config = auth_state.config();
    let claims = SessionTokenClaims::for_user(
        user_id,
        now_unix_seconds(),
        config.session_ttl_seconds(),
    );
    let token = sign_hs256(config.session_secret().expose_secret().as_bytes(), &claims)
        .map_err(|err| ApiError::Internal(anyhow!("failed to sign session token: {err}")))?;

    let cookie = session_cookie(config, &token)
        .map_err(|err| ApiError::Internal(anyhow!("failed to build session cookie: {err}")))?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    Ok(headers)
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session cleared", body = ApiResponse)
    ),
    tag = "auth"
)]
pub async fn logout(auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    // Stateless sessions have nothing to revoke server side; clearing the
    // cookie always succeeds, so repeated logouts are harmless.
    let mut headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(auth_state.config()) {
        headers.insert(SET_COOKIE, cookie);
    }
    (
        StatusCode::OK,
        headers,
        Json(ApiResponse::message("Logged out successfully.")),
    )
}

#[utoipa::path(
    get,
    path = "/authCheck",
    responses(
        (status = 200, description = "Session is active", body = ApiResponse),
        (status = 401, description = "Missing or invalid session cookie", body = ApiResponse)
    ),
    tag = "auth"
)]
pub async fn auth_check(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    match require_auth(&headers, &pool, &auth_state).await {
        Ok(principal) => (
            StatusCode::OK,
            Json(ApiResponse::ok().with_user(UserBody::from(&principal))),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

/// Build a secure `HttpOnly` cookie for the session token.
pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    let secure = config.session_cookie_secure();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(super) fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = config.session_cookie_secure();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Read the session token from the request cookie, if present.
///
/// The cookie is the only supported carrier; no bearer header scheme exists.
pub(super) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}
