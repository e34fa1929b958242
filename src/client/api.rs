//! HTTP wrappers for the resep API endpoints.
//!
//! These helpers centralize the base URL, credentials, and envelope
//! handling, keeping state-store code free of transport details.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::APP_USER_AGENT;
use crate::api::handlers::auth::types::{LoginRequest, SignupRequest};
use crate::api::handlers::recipes::types::{CreateRecipeRequest, UpdateRecipeRequest};
use crate::api::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}

/// Cookie-aware client for one resep server.
pub struct ApiClient {
    base_url: Url,
    http: Client,
}

impl ApiClient {
    /// Build a client for the given server base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::BaseUrl(base_url.to_string()))?;
        // The cookie store carries the HttpOnly session cookie between calls.
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|_| ClientError::BaseUrl(format!("{}{path}", self.base_url)))
    }

    /// Parse the shared envelope; `success: false` becomes a typed error.
    async fn envelope(response: reqwest::Response) -> Result<ApiResponse, ClientError> {
        let status = response.status();
        let body: ApiResponse = response.json().await?;
        if body.success {
            Ok(body)
        } else {
            Err(ClientError::Api {
                status: status.as_u16(),
                message: body
                    .message
                    .unwrap_or_else(|| "Request failed".to_string()),
            })
        }
    }

    /// Register a new account; the session cookie is set on success.
    pub async fn signup(&self, request: &SignupRequest) -> Result<ApiResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/signup")?)
            .json(request)
            .send()
            .await?;
        Self::envelope(response).await
    }

    /// Log in with existing credentials; the session cookie is refreshed.
    pub async fn login(&self, request: &LoginRequest) -> Result<ApiResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/login")?)
            .json(request)
            .send()
            .await?;
        Self::envelope(response).await
    }

    /// Clear the session on the server; always succeeds.
    pub async fn logout(&self) -> Result<ApiResponse, ClientError> {
        let response = self.http.post(self.endpoint("/logout")?).send().await?;
        Self::envelope(response).await
    }

    /// Restore the session after a reload using the stored cookie.
    pub async fn auth_check(&self) -> Result<ApiResponse, ClientError> {
        let response = self.http.get(self.endpoint("/authCheck")?).send().await?;
        Self::envelope(response).await
    }

    /// Create a recipe owned by the authenticated user.
    pub async fn create_recipe(
        &self,
        request: &CreateRecipeRequest,
    ) -> Result<ApiResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/recipe")?)
            .json(request)
            .send()
            .await?;
        Self::envelope(response).await
    }

    /// List the authenticated user's recipes.
    pub async fn list_recipes(&self) -> Result<ApiResponse, ClientError> {
        let response = self.http.get(self.endpoint("/recipe")?).send().await?;
        Self::envelope(response).await
    }

    /// Fetch a single owned recipe by id.
    pub async fn get_recipe(&self, id: &str) -> Result<ApiResponse, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/recipe/{id}"))?)
            .send()
            .await?;
        Self::envelope(response).await
    }

    /// Update any subset of an owned recipe's fields.
    pub async fn update_recipe(
        &self,
        id: &str,
        request: &UpdateRecipeRequest,
    ) -> Result<ApiResponse, ClientError> {
        let response = self
            .http
            .put(self.endpoint(&format!("/recipe/{id}"))?)
            .json(request)
            .send()
            .await?;
        Self::envelope(response).await
    }

    /// Delete an owned recipe by id.
    pub async fn delete_recipe(&self, id: &str) -> Result<ApiResponse, ClientError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/recipe/{id}"))?)
            .send()
            .await?;
        Self::envelope(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::BaseUrl(_))
        ));
    }

    #[test]
    fn builds_endpoints_from_base() -> Result<(), ClientError> {
        let client = ApiClient::new("http://localhost:8080")?;
        assert_eq!(
            client.endpoint("/recipe")?.as_str(),
            "http://localhost:8080/recipe"
        );
        assert_eq!(
            client
                .endpoint("/recipe/1f1b7f9a-0c55-4a8e-9d21-3e5f8a7b6c90")?
                .as_str(),
            "http://localhost:8080/recipe/1f1b7f9a-0c55-4a8e-9d21-3e5f8a7b6c90"
        );
        Ok(())
    }
}
