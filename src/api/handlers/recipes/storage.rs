//! Database helpers for the recipe store.
//!
//! Every read, update, and delete goes through the shared `OWNER_SCOPE`
//! filter, so a recipe is never visible or mutable outside its owner and the
//! check happens atomically with the statement itself.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

/// Ownership predicate shared by all single-recipe operations.
const OWNER_SCOPE: &str = "id = $1 AND owner_id = $2";

const RECIPE_COLUMNS: &str = r#"id, owner_id, name, cuisine, ingredients, instructions,
            cooking_time,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at"#;

pub(super) struct RecipeRow {
    pub(super) id: Uuid,
    pub(super) owner_id: Uuid,
    pub(super) name: String,
    pub(super) cuisine: String,
    pub(super) ingredients: Vec<String>,
    pub(super) instructions: String,
    pub(super) cooking_time: String,
    pub(super) created_at: String,
}

/// Validated field set for a new recipe.
pub(super) struct NewRecipe {
    pub(super) name: String,
    pub(super) cuisine: String,
    pub(super) ingredients: Vec<String>,
    pub(super) instructions: String,
    pub(super) cooking_time: String,
}

/// Partial field set for an update; `None` keeps the stored value.
#[derive(Default)]
pub(super) struct RecipeChanges {
    pub(super) name: Option<String>,
    pub(super) cuisine: Option<String>,
    pub(super) ingredients: Option<Vec<String>>,
    pub(super) instructions: Option<String>,
    pub(super) cooking_time: Option<String>,
}

impl RecipeChanges {
    pub(super) fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cuisine.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
            && self.cooking_time.is_none()
    }
}

fn recipe_row(row: &sqlx::postgres::PgRow) -> RecipeRow {
    RecipeRow {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        cuisine: row.get("cuisine"),
        ingredients: row.get("ingredients"),
        instructions: row.get("instructions"),
        cooking_time: row.get("cooking_time"),
        created_at: row.get("created_at"),
    }
}

/// Insert a recipe on behalf of the authenticated owner. The owner id always
/// comes from the resolved principal, never from request input.
pub(super) async fn insert_recipe(
    pool: &PgPool,
    owner_id: Uuid,
    fields: &NewRecipe,
) -> Result<RecipeRow> {
    let query = format!(
        r"
        INSERT INTO recipes (owner_id, name, cuisine, ingredients, instructions, cooking_time)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {RECIPE_COLUMNS}
    "
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(owner_id)
        .bind(&fields.name)
        .bind(&fields.cuisine)
        .bind(&fields.ingredients)
        .bind(&fields.instructions)
        .bind(&fields.cooking_time)
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to insert recipe")?;

    Ok(recipe_row(&row))
}

/// All recipes owned by the caller, newest first.
pub(super) async fn fetch_recipes_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<RecipeRow>> {
    let query = format!(
        r"
        SELECT {RECIPE_COLUMNS}
        FROM recipes
        WHERE owner_id = $1
        ORDER BY created_at DESC
    "
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let rows = sqlx::query(&query)
        .bind(owner_id)
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to list recipes")?;

    Ok(rows.iter().map(recipe_row).collect())
}

/// Fetch one recipe; `None` covers both "absent" and "not yours".
pub(super) async fn fetch_recipe_scoped(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
) -> Result<Option<RecipeRow>> {
    let query = format!(
        r"
        SELECT {RECIPE_COLUMNS}
        FROM recipes
        WHERE {OWNER_SCOPE}
    "
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch recipe")?;

    Ok(row.map(|row| recipe_row(&row)))
}

/// Apply the given changes in one statement; absent fields keep their stored
/// value. Returns `None` when no owned row matched.
pub(super) async fn update_recipe_scoped(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    changes: &RecipeChanges,
) -> Result<Option<RecipeRow>> {
    let query = format!(
        r"
        UPDATE recipes
        SET
            name = COALESCE($3, name),
            cuisine = COALESCE($4, cuisine),
            ingredients = COALESCE($5::text[], ingredients),
            instructions = COALESCE($6, instructions),
            cooking_time = COALESCE($7, cooking_time)
        WHERE {OWNER_SCOPE}
        RETURNING {RECIPE_COLUMNS}
    "
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(id)
        .bind(owner_id)
        .bind(&changes.name)
        .bind(&changes.cuisine)
        .bind(&changes.ingredients)
        .bind(&changes.instructions)
        .bind(&changes.cooking_time)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to update recipe")?;

    Ok(row.map(|row| recipe_row(&row)))
}

/// Delete one owned recipe; `false` covers both "absent" and "not yours".
pub(super) async fn delete_recipe_scoped(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool> {
    let query = format!("DELETE FROM recipes WHERE {OWNER_SCOPE}");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query.as_str()
    );
    let result = sqlx::query(&query)
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete recipe")?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_scope_filters_on_both_keys() {
        assert!(OWNER_SCOPE.contains("id = $1"));
        assert!(OWNER_SCOPE.contains("owner_id = $2"));
    }

    #[test]
    fn empty_changes_detected() {
        assert!(RecipeChanges::default().is_empty());
        let changes = RecipeChanges {
            name: Some("Soup".to_string()),
            ..RecipeChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
