//! Response envelope and error taxonomy for the HTTP API.
//!
//! Every endpoint answers with the same JSON shape; expected failures are
//! translated here and unexpected ones are logged and collapsed into a
//! generic internal error so no detail leaks to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use super::handlers::{auth::types::UserBody, recipes::types::RecipeBody};

/// Uniform envelope returned by every endpoint.
#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<RecipeBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<RecipeBody>>,
}

impl ApiResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: UserBody) -> Self {
        self.user = Some(user);
        self
    }

    #[must_use]
    pub fn with_recipe(mut self, recipe: RecipeBody) -> Self {
        self.recipe = Some(recipe);
        self
    }

    #[must_use]
    pub fn with_recipes(mut self, recipes: Vec<RecipeBody>) -> Self {
        self.recipes = Some(recipes);
        self
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Expected failure modes of the API, one variant per taxonomy entry.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Auth(String),
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) | Self::Auth(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(err) => {
                // The chain is logged server side; clients only see a generic message.
                error!("Internal error: {err:#}");
                "Internal server error".to_string()
            }
            Self::Unauthenticated => "Unauthenticated".to_string(),
            other => other.to_string(),
        };
        (status, Json(ApiResponse::failure(message))).into_response()
    }
}
