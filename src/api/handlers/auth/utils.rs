//! Small helpers for auth validation and password hashing.

use anyhow::{Context, Result};
use regex::Regex;
use std::time::SystemTime;

pub(crate) const PASSWORD_MIN_LENGTH: usize = 6;

// Fixed work factor; bcrypt embeds the per-hash salt in its output.
const BCRYPT_COST: u32 = 10;

/// Basic email format check; lookups stay case-sensitive, so no normalization.
pub(crate) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Hash a password with a freshly generated salt.
///
/// bcrypt is CPU-bound, so the work runs on the blocking pool.
pub(crate) async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .context("password hashing task failed")?
        .context("failed to hash password")
}

/// Compare a candidate password against a stored hash.
pub(crate) async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task failed")?
        .context("failed to verify password")
}

pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

/// Unix seconds for session token issuance and expiry checks.
pub(crate) fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
