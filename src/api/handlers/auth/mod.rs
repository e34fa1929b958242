//! Authentication handlers and supporting modules.
//!
//! Registration and login verify credentials against bcrypt hashes and issue
//! a stateless signed session token held in an `HttpOnly` cookie. The token
//! is only issued after the user row is confirmed persisted, so a session can
//! never reference a user that failed to save.

pub mod login;
pub mod principal;
pub mod session;
pub mod signup;
mod state;
mod storage;
pub mod types;
mod utils;

pub use state::{AuthConfig, AuthState};
