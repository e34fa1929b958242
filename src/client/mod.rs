//! Typed client for the resep API.
//!
//! [`api::ApiClient`] wraps the HTTP endpoints with a cookie jar so the
//! `HttpOnly` session cookie round-trips exactly as a browser would.
//! [`store::AppStore`] is the presentation-owned state container: it holds
//! the authenticated user and the in-memory recipe list, and moves through
//! explicit loading/success/error phases per action so a UI can render state
//! without reaching into transport concerns.

pub mod api;
pub mod store;
