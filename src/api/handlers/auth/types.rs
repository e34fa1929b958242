//! Request/response types for auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{principal::Principal, storage::UserRow};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user; the password hash never leaves the storage layer.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserBody {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<UserRow> for UserBody {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.to_string(),
            email: row.email,
            name: row.name,
        }
    }
}

impl From<&Principal> for UserBody {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.user_id.to_string(),
            email: principal.email.clone(),
            name: principal.name.clone(),
        }
    }
}
