//! API handlers for resep.
//!
//! Auth endpoints manage credentials and the session cookie; recipe
//! endpoints are ownership-scoped CRUD. Everything answers with the shared
//! response envelope from [`crate::api::response`].

pub mod auth;
pub mod health;
pub mod recipes;
pub mod root;
