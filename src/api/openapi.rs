use utoipa::OpenApi;

use super::handlers::{auth, health, recipes};
use super::response::ApiResponse;

/// OpenAPI document for every documented route.
///
/// Add new endpoints here so they appear in the generated spec served by the
/// Swagger UI. Routes added outside (like `/`) are intentionally not
/// documented.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::signup::signup,
        auth::login::login,
        auth::session::logout,
        auth::session::auth_check,
        recipes::create_recipe,
        recipes::list_recipes,
        recipes::get_recipe,
        recipes::update_recipe,
        recipes::delete_recipe,
    ),
    components(schemas(
        ApiResponse,
        health::Health,
        auth::types::SignupRequest,
        auth::types::LoginRequest,
        auth::types::UserBody,
        recipes::types::CreateRecipeRequest,
        recipes::types::UpdateRecipeRequest,
        recipes::types::RecipeBody,
    )),
    tags(
        (name = "auth", description = "Registration, login, and session restore"),
        (name = "recipes", description = "Ownership-scoped recipe CRUD"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_covers_all_routes() {
        let spec = openapi();
        for path in [
            "/health",
            "/signup",
            "/login",
            "/logout",
            "/authCheck",
            "/recipe",
            "/recipe/{id}",
        ] {
            assert!(
                spec.paths.paths.contains_key(path),
                "missing path: {path}"
            );
        }
    }

    #[test]
    fn openapi_tags_present() {
        let spec = openapi();
        let tags = spec.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "auth"));
        assert!(tags.iter().any(|tag| tag.name == "recipes"));
        assert!(tags.iter().any(|tag| tag.name == "health"));
    }
}
