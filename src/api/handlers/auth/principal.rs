//! Authenticated principal extraction.
//!
//! Flow Overview: read the session cookie, verify the signed token, and
//! resolve its subject to a live user row. This is pure verification; no
//! state is mutated on behalf of the request.

use axum::http::HeaderMap;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::api::response::ApiError;
use crate::token::verify_hs256;

use super::{
    session::extract_session_token,
    state::AuthState,
    storage::lookup_user_by_id,
    utils::now_unix_seconds,
};
use secrecy::ExposeSecret;

/// Authenticated user context derived from the session cookie.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
}

/// Resolve the session cookie into a principal.
///
/// Missing cookie, bad signature, expiry, and a subject that no longer
/// resolves to a user all collapse into `Unauthenticated`; callers cannot
/// distinguish why a session was rejected.
///
/// # Errors
///
/// Returns `ApiError::Unauthenticated` for any invalid session and
/// `ApiError::Internal` when the user lookup itself fails.
pub async fn require_auth(
    headers: &HeaderMap,
    pool: &PgPool,
    auth_state: &AuthState,
) -> Result<Principal, ApiError> {
    let Some(token) = extract_session_token(headers) else {
        return Err(ApiError::Unauthenticated);
    };

    let secret = auth_state.config().session_secret();
    let claims = match verify_hs256(&token, secret.expose_secret().as_bytes(), now_unix_seconds()) {
        Ok(claims) => claims,
        Err(err) => {
            debug!("Session token rejected: {err}");
            return Err(ApiError::Unauthenticated);
        }
    };

    let Ok(user_id) = claims.user_id() else {
        return Err(ApiError::Unauthenticated);
    };

    match lookup_user_by_id(pool, user_id).await {
        Ok(Some(user)) => Ok(Principal {
            user_id: user.id,
            email: user.email,
            name: user.name,
        }),
        // A token that outlives its user is treated like any other bad session.
        Ok(None) => Err(ApiError::Unauthenticated),
        Err(err) => Err(ApiError::Internal(err)),
    }
}
