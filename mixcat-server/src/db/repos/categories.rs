//! Category repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::db::PgCatalog;
use crate::models::CategoryName;

use super::DbError;

/// Category record from storage
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Category persistence operations.
///
/// `update_*` and `create_*` take the image reference as
/// `Option<String>`: `None` on update means "keep the stored image",
/// matching the full-replace-except-image mutation contract.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, DbError>;

    async fn get_category(&self, id: Uuid) -> Result<Category, DbError>;

    /// Cheap existence probe used by the drink write path to reject
    /// references to missing categories.
    async fn category_exists(&self, id: Uuid) -> Result<bool, DbError>;

    async fn create_category(
        &self,
        name: CategoryName,
        image_url: Option<String>,
    ) -> Result<Category, DbError>;

    async fn update_category(
        &self,
        id: Uuid,
        name: CategoryName,
        image_url: Option<String>,
    ) -> Result<Category, DbError>;

    /// Delete a category, returning the removed image reference for
    /// asset cleanup. Drinks referencing the category are untouched.
    async fn delete_category(&self, id: Uuid) -> Result<Option<String>, DbError>;
}

#[async_trait]
impl CategoryStore for PgCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, image_url, created_at FROM categories ORDER BY created_at ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(categories)
    }

    async fn get_category(&self, id: Uuid) -> Result<Category, DbError> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, image_url, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "category",
            id: id.to_string(),
        })
    }

    async fn category_exists(&self, id: Uuid) -> Result<bool, DbError> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool())
                .await?;

        Ok(row.0)
    }

    async fn create_category(
        &self,
        name: CategoryName,
        image_url: Option<String>,
    ) -> Result<Category, DbError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, image_url)
            VALUES ($1, $2)
            RETURNING id, name, image_url, created_at
            "#,
        )
        .bind(name.as_str())
        .bind(image_url.as_deref())
        .fetch_one(self.pool())
        .await?;

        Ok(category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        name: CategoryName,
        image_url: Option<String>,
    ) -> Result<Category, DbError> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, image_url = COALESCE($3, image_url)
            WHERE id = $1
            RETURNING id, name, image_url, created_at
            "#,
        )
        .bind(id)
        .bind(name.as_str())
        .bind(image_url.as_deref())
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "category",
            id: id.to_string(),
        })
    }

    async fn delete_category(&self, id: Uuid) -> Result<Option<String>, DbError> {
        let row = sqlx::query("DELETE FROM categories WHERE id = $1 RETURNING image_url")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "category",
                id: id.to_string(),
            })?;

        Ok(row.get("image_url"))
    }
}
