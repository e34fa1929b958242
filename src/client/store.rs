//! Client-side state container.
//!
//! Holds the authenticated user and the in-memory recipe list, and reflects
//! every API call into UI-observable state. Each action moves its phase
//! through Loading and then Ready or Failed; transition logic is separated
//! from I/O so it can be tested without a server.

use crate::api::handlers::auth::types::{LoginRequest, SignupRequest, UserBody};
use crate::api::handlers::recipes::types::{
    CreateRecipeRequest, RecipeBody, UpdateRecipeRequest,
};
use crate::api::response::ApiResponse;

use super::api::{ApiClient, ClientError};

/// Lifecycle of one UI-visible action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

pub struct AppStore {
    client: ApiClient,
    user: Option<UserBody>,
    recipes: Vec<RecipeBody>,
    auth_phase: Phase,
    recipes_phase: Phase,
}

impl AppStore {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            user: None,
            recipes: Vec::new(),
            auth_phase: Phase::Idle,
            recipes_phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserBody> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn recipes(&self) -> &[RecipeBody] {
        &self.recipes
    }

    #[must_use]
    pub fn auth_phase(&self) -> &Phase {
        &self.auth_phase
    }

    #[must_use]
    pub fn recipes_phase(&self) -> &Phase {
        &self.recipes_phase
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Register and adopt the fresh session.
    pub async fn signup(&mut self, request: &SignupRequest) {
        self.auth_phase = Phase::Loading;
        let result = self.client.signup(request).await;
        self.apply_auth_result(result);
    }

    /// Log in and adopt the fresh session.
    pub async fn login(&mut self, request: &LoginRequest) {
        self.auth_phase = Phase::Loading;
        let result = self.client.login(request).await;
        self.apply_auth_result(result);
    }

    /// Clear the session; local state empties even though the server call
    /// cannot fail meaningfully.
    pub async fn logout(&mut self) {
        self.auth_phase = Phase::Loading;
        let result = self.client.logout().await;
        self.apply_logout_result(result);
    }

    /// Restore the session after a page reload. A missing session is a
    /// normal signed-out state, not a failure.
    pub async fn hydrate(&mut self) {
        self.auth_phase = Phase::Loading;
        let result = self.client.auth_check().await;
        self.apply_hydrate_result(result);
    }

    /// Reload the recipe list from the server.
    pub async fn refresh_recipes(&mut self) {
        self.recipes_phase = Phase::Loading;
        let result = self.client.list_recipes().await;
        self.apply_recipes_result(result);
    }

    /// Create a recipe and reflect it into the list.
    pub async fn create_recipe(&mut self, request: &CreateRecipeRequest) {
        self.recipes_phase = Phase::Loading;
        let result = self.client.create_recipe(request).await;
        self.apply_created_result(result);
    }

    /// Update a recipe and replace it in the list.
    pub async fn update_recipe(&mut self, id: &str, request: &UpdateRecipeRequest) {
        self.recipes_phase = Phase::Loading;
        let result = self.client.update_recipe(id, request).await;
        self.apply_updated_result(result);
    }

    /// Delete a recipe and drop it from the list.
    pub async fn delete_recipe(&mut self, id: &str) {
        self.recipes_phase = Phase::Loading;
        let result = self.client.delete_recipe(id).await;
        self.apply_deleted_result(id, result);
    }

    fn apply_auth_result(&mut self, result: Result<ApiResponse, ClientError>) {
        match result {
            Ok(envelope) => {
                self.user = envelope.user;
                self.auth_phase = Phase::Ready;
            }
            Err(err) => {
                self.user = None;
                self.auth_phase = Phase::Failed(err.to_string());
            }
        }
    }

    fn apply_logout_result(&mut self, result: Result<ApiResponse, ClientError>) {
        // Local state clears regardless; the cookie is gone either way.
        self.user = None;
        self.recipes.clear();
        self.auth_phase = match result {
            Ok(_) => Phase::Ready,
            Err(err) => Phase::Failed(err.to_string()),
        };
    }

    fn apply_hydrate_result(&mut self, result: Result<ApiResponse, ClientError>) {
        match result {
            Ok(envelope) => {
                self.user = envelope.user;
                self.auth_phase = Phase::Ready;
            }
            Err(ClientError::Api { status: 401, .. }) => {
                self.user = None;
                self.auth_phase = Phase::Ready;
            }
            Err(err) => {
                self.user = None;
                self.auth_phase = Phase::Failed(err.to_string());
            }
        }
    }

    fn apply_recipes_result(&mut self, result: Result<ApiResponse, ClientError>) {
        match result {
            Ok(envelope) => {
                self.recipes = envelope.recipes.unwrap_or_default();
                self.recipes_phase = Phase::Ready;
            }
            Err(err) => {
                self.recipes_phase = Phase::Failed(err.to_string());
            }
        }
    }

    fn apply_created_result(&mut self, result: Result<ApiResponse, ClientError>) {
        match result {
            Ok(envelope) => {
                if let Some(recipe) = envelope.recipe {
                    // Newest first, matching the server's list order.
                    self.recipes.insert(0, recipe);
                }
                self.recipes_phase = Phase::Ready;
            }
            Err(err) => {
                self.recipes_phase = Phase::Failed(err.to_string());
            }
        }
    }

    fn apply_updated_result(&mut self, result: Result<ApiResponse, ClientError>) {
        match result {
            Ok(envelope) => {
                if let Some(updated) = envelope.recipe {
                    if let Some(slot) = self.recipes.iter_mut().find(|r| r.id == updated.id) {
                        *slot = updated;
                    }
                }
                self.recipes_phase = Phase::Ready;
            }
            Err(err) => {
                self.recipes_phase = Phase::Failed(err.to_string());
            }
        }
    }

    fn apply_deleted_result(&mut self, id: &str, result: Result<ApiResponse, ClientError>) {
        match result {
            Ok(_) => {
                self.recipes.retain(|recipe| recipe.id != id);
                self.recipes_phase = Phase::Ready;
            }
            Err(err) => {
                self.recipes_phase = Phase::Failed(err.to_string());
            }
        }
    }
}
