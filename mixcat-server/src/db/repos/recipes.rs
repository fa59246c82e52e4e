//! Recipe repository
//!
//! Recipes are administrative content, unrelated to drinks. Lists are
//! ordered by name ascending.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::PgCatalog;
use crate::models::NewRecipe;

use super::DbError;

/// Recipe record from storage
#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Recipe persistence operations.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// List all recipes, name ascending.
    async fn list_recipes(&self) -> Result<Vec<Recipe>, DbError>;

    async fn create_recipe(&self, input: NewRecipe) -> Result<Recipe, DbError>;

    async fn update_recipe(&self, id: Uuid, input: NewRecipe) -> Result<Recipe, DbError>;

    async fn delete_recipe(&self, id: Uuid) -> Result<(), DbError>;
}

#[async_trait]
impl RecipeStore for PgCatalog {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, DbError> {
        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, ingredients, instructions, description, created_at
            FROM recipes
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(recipes)
    }

    async fn create_recipe(&self, input: NewRecipe) -> Result<Recipe, DbError> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (name, ingredients, instructions, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, ingredients, instructions, description, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.ingredients)
        .bind(&input.instructions)
        .bind(input.description.as_deref())
        .fetch_one(self.pool())
        .await?;

        Ok(recipe)
    }

    async fn update_recipe(&self, id: Uuid, input: NewRecipe) -> Result<Recipe, DbError> {
        sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
            SET name = $2, ingredients = $3, instructions = $4, description = $5
            WHERE id = $1
            RETURNING id, name, ingredients, instructions, description, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.ingredients)
        .bind(&input.instructions)
        .bind(input.description.as_deref())
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "recipe",
            id: id.to_string(),
        })
    }

    async fn delete_recipe(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "recipe",
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
