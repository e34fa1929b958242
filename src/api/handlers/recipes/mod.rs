//! Recipe CRUD handlers.
//!
//! Every operation authenticates through the access guard and is scoped to
//! the caller's ownership; a correct id under the wrong identity answers
//! `404`, indistinguishable from a missing record.

use axum::{
    Json,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::response::{ApiError, ApiResponse};

use super::auth::{AuthState, principal::require_auth};

mod storage;
pub mod types;

use storage::{
    NewRecipe, RecipeChanges, delete_recipe_scoped, fetch_recipe_scoped, fetch_recipes_for_owner,
    insert_recipe, update_recipe_scoped,
};
use types::{CreateRecipeRequest, RecipeBody, UpdateRecipeRequest};

/// Trim an optional field and drop it when blank.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Trim ingredient entries, dropping blanks; an empty list counts as absent.
fn present_ingredients(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value
        .map(|list| {
            list.into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|list| !list.is_empty())
}

/// Parse a path id; malformed ids answer like missing recipes so the two
/// cases stay indistinguishable.
fn parse_recipe_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id.trim()).map_err(|_| ApiError::NotFound("Recipe not found.".to_string()))
}

#[utoipa::path(
    post,
    path = "/recipe",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = ApiResponse),
        (status = 400, description = "Missing fields", body = ApiResponse),
        (status = 401, description = "Missing or invalid session cookie", body = ApiResponse)
    ),
    tag = "recipes"
)]
pub async fn create_recipe(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<CreateRecipeRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool, &auth_state).await {
        Ok(principal) => principal,
        Err(err) => return err.into_response(),
    };

    let Some(Json(payload)) = payload else {
        return ApiError::Validation("Missing payload".to_string()).into_response();
    };

    let fields = match (
        present(payload.name),
        present(payload.cuisine),
        present_ingredients(payload.ingredients),
        present(payload.instructions),
        present(payload.cooking_time),
    ) {
        (Some(name), Some(cuisine), Some(ingredients), Some(instructions), Some(cooking_time)) => {
            NewRecipe {
                name,
                cuisine,
                ingredients,
                instructions,
                cooking_time,
            }
        }
        _ => {
            return ApiError::Validation("All fields are required.".to_string()).into_response();
        }
    };

    // The owner is always the authenticated caller, never request input.
    match insert_recipe(&pool, principal.user_id, &fields).await {
        Ok(row) => (
            StatusCode::CREATED,
            Json(
                ApiResponse::message("Recipe created successfully.")
                    .with_recipe(RecipeBody::from(row)),
            ),
        )
            .into_response(),
        Err(err) => ApiError::Internal(err).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/recipe",
    responses(
        (status = 200, description = "Recipes owned by the caller", body = ApiResponse),
        (status = 401, description = "Missing or invalid session cookie", body = ApiResponse)
    ),
    tag = "recipes"
)]
pub async fn list_recipes(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool, &auth_state).await {
        Ok(principal) => principal,
        Err(err) => return err.into_response(),
    };

    match fetch_recipes_for_owner(&pool, principal.user_id).await {
        Ok(rows) => {
            let recipes = rows.into_iter().map(RecipeBody::from).collect();
            (StatusCode::OK, Json(ApiResponse::ok().with_recipes(recipes))).into_response()
        }
        Err(err) => ApiError::Internal(err).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/recipe/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe detail", body = ApiResponse),
        (status = 401, description = "Missing or invalid session cookie", body = ApiResponse),
        (status = 404, description = "Recipe absent or owned by someone else", body = ApiResponse)
    ),
    tag = "recipes"
)]
pub async fn get_recipe(
    Path(id): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool, &auth_state).await {
        Ok(principal) => principal,
        Err(err) => return err.into_response(),
    };

    let recipe_id = match parse_recipe_id(&id) {
        Ok(recipe_id) => recipe_id,
        Err(err) => return err.into_response(),
    };

    match fetch_recipe_scoped(&pool, recipe_id, principal.user_id).await {
        Ok(Some(row)) => (
            StatusCode::OK,
            Json(ApiResponse::ok().with_recipe(RecipeBody::from(row))),
        )
            .into_response(),
        Ok(None) => ApiError::NotFound("Recipe not found.".to_string()).into_response(),
        Err(err) => ApiError::Internal(err).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/recipe/{id}",
    request_body = UpdateRecipeRequest,
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe updated", body = ApiResponse),
        (status = 400, description = "No updates provided", body = ApiResponse),
        (status = 401, description = "Missing or invalid session cookie", body = ApiResponse),
        (status = 404, description = "Recipe absent or owned by someone else", body = ApiResponse)
    ),
    tag = "recipes"
)]
pub async fn update_recipe(
    Path(id): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<UpdateRecipeRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool, &auth_state).await {
        Ok(principal) => principal,
        Err(err) => return err.into_response(),
    };

    let recipe_id = match parse_recipe_id(&id) {
        Ok(recipe_id) => recipe_id,
        Err(err) => return err.into_response(),
    };

    let Some(Json(payload)) = payload else {
        return ApiError::Validation("Missing payload".to_string()).into_response();
    };

    let changes = RecipeChanges {
        name: present(payload.name),
        cuisine: present(payload.cuisine),
        ingredients: present_ingredients(payload.ingredients),
        instructions: present(payload.instructions),
        cooking_time: present(payload.cooking_time),
    };

    if changes.is_empty() {
        return ApiError::Validation("No updates provided.".to_string()).into_response();
    }

    match update_recipe_scoped(&pool, recipe_id, principal.user_id, &changes).await {
        Ok(Some(row)) => (
            StatusCode::OK,
            Json(
                ApiResponse::message("Recipe updated successfully.")
                    .with_recipe(RecipeBody::from(row)),
            ),
        )
            .into_response(),
        Ok(None) => ApiError::NotFound("Recipe not found.".to_string()).into_response(),
        Err(err) => ApiError::Internal(err).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/recipe/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe deleted", body = ApiResponse),
        (status = 401, description = "Missing or invalid session cookie", body = ApiResponse),
        (status = 404, description = "Recipe absent or owned by someone else", body = ApiResponse)
    ),
    tag = "recipes"
)]
pub async fn delete_recipe(
    Path(id): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool, &auth_state).await {
        Ok(principal) => principal,
        Err(err) => return err.into_response(),
    };

    let recipe_id = match parse_recipe_id(&id) {
        Ok(recipe_id) => recipe_id,
        Err(err) => return err.into_response(),
    };

    match delete_recipe_scoped(&pool, recipe_id, principal.user_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::message("Recipe deleted successfully.")),
        )
            .into_response(),
        Ok(false) => ApiError::NotFound("Recipe not found.".to_string()).into_response(),
        Err(err) => ApiError::Internal(err).into_response(),
    }
}
