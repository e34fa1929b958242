//! Request/response types for recipe endpoints.
//!
//! Bodies use camelCase on the wire (`cookingTime`, `ownerId`). Request
//! fields arrive as options so missing fields surface as validation errors
//! instead of deserialization failures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::storage::RecipeRow;

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub cooking_time: Option<String>,
}

/// Any subset of fields; absent ones keep their stored value.
#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub cooking_time: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeBody {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub cuisine: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: String,
    pub created_at: String,
}

impl From<RecipeRow> for RecipeBody {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id.to_string(),
            owner_id: row.owner_id.to_string(),
            name: row.name,
            cuisine: row.cuisine,
            ingredients: row.ingredients,
            instructions: row.instructions,
            cooking_time: row.cooking_time,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn create_request_uses_camel_case() -> Result<()> {
        let request: CreateRecipeRequest = serde_json::from_value(serde_json::json!({
            "name": "Soup",
            "cuisine": "Fr",
            "ingredients": ["salt", "water"],
            "instructions": "boil",
            "cookingTime": "10"
        }))?;
        assert_eq!(request.cooking_time.as_deref(), Some("10"));
        assert_eq!(
            request.ingredients.context("missing ingredients")?,
            vec!["salt".to_string(), "water".to_string()]
        );
        Ok(())
    }

    #[test]
    fn update_request_accepts_subset() -> Result<()> {
        let request: UpdateRecipeRequest = serde_json::from_value(serde_json::json!({
            "name": "Onion Soup"
        }))?;
        assert_eq!(request.name.as_deref(), Some("Onion Soup"));
        assert!(request.cuisine.is_none());
        assert!(request.cooking_time.is_none());
        Ok(())
    }

    #[test]
    fn recipe_body_serializes_camel_case() -> Result<()> {
        let body = RecipeBody {
            id: "1f1b7f9a-0c55-4a8e-9d21-3e5f8a7b6c90".to_string(),
            owner_id: "8d5e63a8-4f3b-4a6e-9c6d-2f1b7c9d4e10".to_string(),
            name: "Soup".to_string(),
            cuisine: "Fr".to_string(),
            ingredients: vec!["salt".to_string(), "water".to_string()],
            instructions: "boil".to_string(),
            cooking_time: "10".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        };
        let value = serde_json::to_value(&body)?;
        assert!(value.get("cookingTime").is_some());
        assert!(value.get("ownerId").is_some());
        assert!(value.get("cooking_time").is_none());
        Ok(())
    }
}
