//! Drink repository
//!
//! Every read resolves the owning category in the same query via LEFT
//! JOIN. A dangling category reference yields `category: None` for that
//! drink; it never fails the read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use crate::db::PgCatalog;
use crate::models::{DrinkDetails, FlavorProfile, NewDrink};

use super::DbError;

/// Resolved owning category attached to a drink at read time.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
}

/// Drink record with its category pre-resolved.
#[derive(Debug, Clone)]
pub struct Drink {
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
    pub category: Option<CategoryRef>,
    pub details: DrinkDetails,
    pub flavor: FlavorProfile,
    pub ingredients: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Drink persistence operations.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    async fn list_drinks(&self) -> Result<Vec<Drink>, DbError>;

    async fn get_drink(&self, id: Uuid) -> Result<Drink, DbError>;

    async fn create_drink(
        &self,
        input: NewDrink,
        image_url: Option<String>,
    ) -> Result<Drink, DbError>;

    /// Full-replace update. `image_url: None` keeps the stored image.
    async fn update_drink(
        &self,
        id: Uuid,
        input: NewDrink,
        image_url: Option<String>,
    ) -> Result<Drink, DbError>;

    /// Delete a drink, returning the removed image reference for asset
    /// cleanup.
    async fn delete_drink(&self, id: Uuid) -> Result<Option<String>, DbError>;
}

/// Column list shared by every drink query that joins categories.
const DRINK_COLUMNS: &str = r#"
    d.id, d.name, d.category_id,
    d.price, d.volume, d.alcohol_content, d.description,
    d.acid, d.sugar, d.creamy, d.spicy, d.bitter,
    d.ingredients, d.image_url, d.created_at,
    c.id AS resolved_category_id,
    c.name AS category_name,
    c.image_url AS category_image_url
"#;

fn drink_from_row(row: &PgRow) -> Drink {
    // LEFT JOIN: a NULL resolved id means the reference is absent or dangling
    let category = row
        .get::<Option<Uuid>, _>("resolved_category_id")
        .map(|id| CategoryRef {
            id,
            name: row.get("category_name"),
            image_url: row.get("category_image_url"),
        });

    Drink {
        id: row.get("id"),
        name: row.get("name"),
        category_id: row.get("category_id"),
        category,
        details: DrinkDetails {
            price: row.get("price"),
            volume: row.get("volume"),
            alcohol_content: row.get("alcohol_content"),
            description: row.get("description"),
        },
        flavor: FlavorProfile {
            acid: row.get("acid"),
            sugar: row.get("sugar"),
            creamy: row.get("creamy"),
            spicy: row.get("spicy"),
            bitter: row.get("bitter"),
        },
        ingredients: row.get("ingredients"),
        image_url: row.get("image_url"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl DrinkStore for PgCatalog {
    async fn list_drinks(&self) -> Result<Vec<Drink>, DbError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {DRINK_COLUMNS}
            FROM drinks d
            LEFT JOIN categories c ON c.id = d.category_id
            ORDER BY d.created_at ASC
            "#
        ))
        .fetch_all(self.pool())
        .await?;

        Ok(rows.iter().map(drink_from_row).collect())
    }

    async fn get_drink(&self, id: Uuid) -> Result<Drink, DbError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {DRINK_COLUMNS}
            FROM drinks d
            LEFT JOIN categories c ON c.id = d.category_id
            WHERE d.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "drink",
            id: id.to_string(),
        })?;

        Ok(drink_from_row(&row))
    }

    async fn create_drink(
        &self,
        input: NewDrink,
        image_url: Option<String>,
    ) -> Result<Drink, DbError> {
        // CTE: insert and resolve the category in a single round trip
        let row = sqlx::query(&format!(
            r#"
            WITH d AS (
                INSERT INTO drinks
                    (name, category_id, price, volume, alcohol_content, description,
                     acid, sugar, creamy, spicy, bitter, ingredients, image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                RETURNING *
            )
            SELECT {DRINK_COLUMNS}
            FROM d
            LEFT JOIN categories c ON c.id = d.category_id
            "#
        ))
        .bind(input.name.as_str())
        .bind(input.category_id)
        .bind(input.details.price)
        .bind(input.details.volume)
        .bind(input.details.alcohol_content)
        .bind(input.details.description.as_deref())
        .bind(input.flavor.acid)
        .bind(input.flavor.sugar)
        .bind(input.flavor.creamy)
        .bind(input.flavor.spicy)
        .bind(input.flavor.bitter)
        .bind(&input.ingredients)
        .bind(image_url.as_deref())
        .fetch_one(self.pool())
        .await?;

        Ok(drink_from_row(&row))
    }

    async fn update_drink(
        &self,
        id: Uuid,
        input: NewDrink,
        image_url: Option<String>,
    ) -> Result<Drink, DbError> {
        let row = sqlx::query(&format!(
            r#"
            WITH d AS (
                UPDATE drinks
                SET name = $2, category_id = $3,
                    price = $4, volume = $5, alcohol_content = $6, description = $7,
                    acid = $8, sugar = $9, creamy = $10, spicy = $11, bitter = $12,
                    ingredients = $13,
                    image_url = COALESCE($14, image_url)
                WHERE id = $1
                RETURNING *
            )
            SELECT {DRINK_COLUMNS}
            FROM d
            LEFT JOIN categories c ON c.id = d.category_id
            "#
        ))
        .bind(id)
        .bind(input.name.as_str())
        .bind(input.category_id)
        .bind(input.details.price)
        .bind(input.details.volume)
        .bind(input.details.alcohol_content)
        .bind(input.details.description.as_deref())
        .bind(input.flavor.acid)
        .bind(input.flavor.sugar)
        .bind(input.flavor.creamy)
        .bind(input.flavor.spicy)
        .bind(input.flavor.bitter)
        .bind(&input.ingredients)
        .bind(image_url.as_deref())
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "drink",
            id: id.to_string(),
        })?;

        Ok(drink_from_row(&row))
    }

    async fn delete_drink(&self, id: Uuid) -> Result<Option<String>, DbError> {
        let row = sqlx::query("DELETE FROM drinks WHERE id = $1 RETURNING image_url")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "drink",
                id: id.to_string(),
            })?;

        Ok(row.get("image_url"))
    }
}

#[cfg(test)]
mod tests {
    // Referential tolerance and flavor round-trips against a real database
    // live in tests/pg.rs; the same properties run against MemoryCatalog
    // through the router in tests/api.rs.
}
