//! # Resep (Recipe Management API)
//!
//! `resep` is a recipe management backend. Users register and authenticate
//! with email and password; authenticated users create, list, view, edit,
//! and delete their own recipes.
//!
//! ## Sessions
//!
//! Authentication issues a stateless HS256-signed token carried in an
//! `HttpOnly` cookie. There is no server-side session table; a token is
//! valid until it expires or the signing secret rotates. Tokens are issued
//! only after the user row is confirmed persisted.
//!
//! ## Ownership
//!
//! Every recipe belongs to exactly one user. Reads, updates, and deletes
//! filter on `(id, owner_id)` in a single statement, and a correct id under
//! the wrong identity answers `404 Not Found` rather than `403 Forbidden`,
//! so record existence never leaks across users.
//!
//! ## Client
//!
//! The [`client`] module provides a typed API client plus an explicit state
//! container with loading/success/error transitions, mirroring what a
//! browser frontend holds in memory.

pub mod api;
pub mod cli;
pub mod client;
pub mod token;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
