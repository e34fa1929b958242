//! End-to-end API tests against a real PostgreSQL database.
//!
//! These tests are skipped unless `RESEP_TEST_DSN` points at a reachable
//! database; the schema is applied on first connect.

use anyhow::{Context, Result};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, Response, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
};
use resep::api::handlers::auth::{AuthConfig, AuthState};
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use tower::ServiceExt;
use ulid::Ulid;

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

async fn test_app() -> Result<Option<Router>> {
    let Ok(dsn) = std::env::var("RESEP_TEST_DSN") else {
        eprintln!("Skipping integration test: RESEP_TEST_DSN not set");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&dsn)
        .await
        .context("failed to connect test pool")?;

    apply_schema(&pool).await?;

    let config = AuthConfig::new(
        SecretString::from("integration-test-secret".to_string()),
        "http://localhost:5173".to_string(),
    );
    let auth_state = Arc::new(AuthState::new(config));

    Ok(Some(resep::api::router(pool, auth_state)))
}

async fn apply_schema(pool: &PgPool) -> Result<()> {
    for (index, statement) in split_sql_statements(SCHEMA_SQL).iter().enumerate() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("failed to execute schema statement {}", index + 1))?;
    }
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") {
            continue;
        }
        current.push_str(line);
        current.push('\n');

        if trimmed.ends_with(';') {
            let statement = current.trim();
            if !statement.is_empty() {
                statements.push(statement.to_string());
            }
            current.clear();
        }
    }

    let leftover = current.trim();
    if !leftover.is_empty() {
        statements.push(leftover.to_string());
    }

    statements
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.com", Ulid::new().to_string().to_lowercase())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Result<Response<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };
    app.clone()
        .oneshot(request)
        .await
        .map_err(|err| anyhow::anyhow!("request failed: {err}"))
}

fn session_cookie(response: &Response<Body>) -> Option<String> {
    let value = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    value.split(';').next().map(str::to_string)
}

async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    serde_json::from_slice(&bytes).context("response body is not JSON")
}

async fn signup(app: &Router, email: &str, password: &str, name: &str) -> Result<(StatusCode, Option<String>, Value)> {
    let response = send(
        app,
        "POST",
        "/signup",
        None,
        Some(json!({"email": email, "password": password, "name": name})),
    )
    .await?;
    let status = response.status();
    let cookie = session_cookie(&response);
    let body = body_json(response).await?;
    Ok((status, cookie, body))
}

#[tokio::test]
async fn signup_login_and_auth_check() -> Result<()> {
    let Some(app) = test_app().await? else {
        return Ok(());
    };

    let email = unique_email("alice");
    let (status, cookie, body) = signup(&app, &email, "secret1", "A").await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["name"], "A");
    let cookie = cookie.context("signup should set the session cookie")?;
    assert!(cookie.starts_with("resep_session="));

    // Duplicate email conflicts regardless of other fields.
    let (status, _, body) = signup(&app, &email, "other-password", "B").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // Wrong password is a credential failure, unknown email a 404.
    let response = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"email": email, "password": "wrong-1"})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"email": unique_email("ghost"), "password": "secret1"})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"email": email, "password": "secret1"})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).context("login should set the session cookie")?;
    let body = body_json(response).await?;
    assert_eq!(body["user"]["name"], "A");

    // The cookie restores the session; no cookie means unauthenticated.
    let response = send(&app, "GET", "/authCheck", Some(&cookie), None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["user"]["email"], email);

    let response = send(&app, "GET", "/authCheck", None, None).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn signup_validation_rules() -> Result<()> {
    let Some(app) = test_app().await? else {
        return Ok(());
    };

    // Missing fields, malformed email, and short passwords all fail closed.
    let (status, cookie, body) = signup(&app, "", "secret1", "A").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(cookie.is_none());

    let (status, _, _) = signup(&app, "not-an-email", "secret1", "A").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = signup(&app, &unique_email("short"), "five5", "A").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn recipe_crud_round_trip() -> Result<()> {
    let Some(app) = test_app().await? else {
        return Ok(());
    };

    let (status, cookie, _) = signup(&app, &unique_email("cook"), "secret1", "Cook").await?;
    assert_eq!(status, StatusCode::CREATED);
    let cookie = cookie.context("missing session cookie")?;

    // Create requires every field.
    let response = send(
        &app,
        "POST",
        "/recipe",
        Some(&cookie),
        Some(json!({"name": "Soup", "cuisine": "Fr"})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let recipe = json!({
        "name": "Soup",
        "cuisine": "Fr",
        "ingredients": ["salt", "water"],
        "instructions": "boil",
        "cookingTime": "10"
    });
    let response = send(&app, "POST", "/recipe", Some(&cookie), Some(recipe)).await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    let id = body["recipe"]["id"]
        .as_str()
        .context("created recipe must have an id")?
        .to_string();

    // List contains the new recipe.
    let response = send(&app, "GET", "/recipe", Some(&cookie), None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    let listed = body["recipes"]
        .as_array()
        .context("recipes must be an array")?;
    assert!(listed.iter().any(|r| r["id"] == id.as_str()));

    // Round-trip: the stored fields match what was created.
    let response = send(&app, "GET", &format!("/recipe/{id}"), Some(&cookie), None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["recipe"]["name"], "Soup");
    assert_eq!(body["recipe"]["cuisine"], "Fr");
    assert_eq!(body["recipe"]["ingredients"], json!(["salt", "water"]));
    assert_eq!(body["recipe"]["instructions"], "boil");
    assert_eq!(body["recipe"]["cookingTime"], "10");

    // Subset update keeps the untouched fields.
    let response = send(
        &app,
        "PUT",
        &format!("/recipe/{id}"),
        Some(&cookie),
        Some(json!({"name": "Onion Soup"})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["recipe"]["name"], "Onion Soup");
    assert_eq!(body["recipe"]["cuisine"], "Fr");

    // Empty updates are rejected.
    let response = send(
        &app,
        "PUT",
        &format!("/recipe/{id}"),
        Some(&cookie),
        Some(json!({})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Delete, then the id is gone.
    let response = send(&app, "DELETE", &format!("/recipe/{id}"), Some(&cookie), None).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", &format!("/recipe/{id}"), Some(&cookie), None).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &format!("/recipe/{id}"), Some(&cookie), None).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn ownership_never_leaks_across_users() -> Result<()> {
    let Some(app) = test_app().await? else {
        return Ok(());
    };

    let (_, owner_cookie, _) = signup(&app, &unique_email("owner"), "secret1", "Owner").await?;
    let owner_cookie = owner_cookie.context("missing owner cookie")?;
    let (_, other_cookie, _) = signup(&app, &unique_email("other"), "secret1", "Other").await?;
    let other_cookie = other_cookie.context("missing other cookie")?;

    let response = send(
        &app,
        "POST",
        "/recipe",
        Some(&owner_cookie),
        Some(json!({
            "name": "Secret Stew",
            "cuisine": "Fr",
            "ingredients": ["beef"],
            "instructions": "simmer",
            "cookingTime": "90"
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    let id = body["recipe"]["id"]
        .as_str()
        .context("created recipe must have an id")?
        .to_string();

    // A correct id under the wrong identity reads as absent.
    let response = send(&app, "GET", &format!("/recipe/{id}"), Some(&other_cookie), None).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        "PUT",
        &format!("/recipe/{id}"),
        Some(&other_cookie),
        Some(json!({"name": "Stolen Stew"})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        "DELETE",
        &format!("/recipe/{id}"),
        Some(&other_cookie),
        None,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The other user's list never shows the recipe.
    let response = send(&app, "GET", "/recipe", Some(&other_cookie), None).await?;
    let body = body_json(response).await?;
    let listed = body["recipes"]
        .as_array()
        .context("recipes must be an array")?;
    assert!(listed.iter().all(|r| r["id"] != id.as_str()));

    // The owner still sees it untouched.
    let response = send(&app, "GET", &format!("/recipe/{id}"), Some(&owner_cookie), None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["recipe"]["name"], "Secret Stew");

    Ok(())
}

#[tokio::test]
async fn logout_is_idempotent() -> Result<()> {
    let Some(app) = test_app().await? else {
        return Ok(());
    };

    for _ in 0..3 {
        let response = send(&app, "POST", "/logout", None, None).await?;
        assert_eq!(response.status(), StatusCode::OK);
        let cleared = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(cleared.contains("Max-Age=0"));
        let body = body_json(response).await?;
        assert_eq!(body["success"], true);
    }

    Ok(())
}

#[tokio::test]
async fn recipe_routes_require_a_session() -> Result<()> {
    let Some(app) = test_app().await? else {
        return Ok(());
    };

    for (method, uri) in [
        ("POST", "/recipe"),
        ("GET", "/recipe"),
        ("GET", "/recipe/1f1b7f9a-0c55-4a8e-9d21-3e5f8a7b6c90"),
        ("PUT", "/recipe/1f1b7f9a-0c55-4a8e-9d21-3e5f8a7b6c90"),
        ("DELETE", "/recipe/1f1b7f9a-0c55-4a8e-9d21-3e5f8a7b6c90"),
    ] {
        let response = send(&app, method, uri, None, None).await?;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{method} {uri} must require a session"
        );
    }

    // A tampered cookie is rejected the same way.
    let response = send(
        &app,
        "GET",
        "/recipe",
        Some("resep_session=aaaa.bbbb.cccc"),
        None,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
