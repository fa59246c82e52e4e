//! In-memory catalog store
//!
//! Implements the same repository traits as [`PgCatalog`] over process
//! memory. Used by the router-level tests and usable as a throwaway dev
//! backend. Locks are held only for the duration of each synchronous
//! operation; nothing awaits while locked.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{CategoryName, DrinkDetails, FlavorProfile, NewDrink, NewRecipe};

use super::{
    Category, CategoryRef, CategoryStore, DbError, Drink, DrinkStore, Recipe, RecipeStore,
    StatsStore, User, UserStore,
};

#[derive(Debug, Clone)]
struct StoredDrink {
    id: Uuid,
    name: String,
    category_id: Option<Uuid>,
    details: DrinkDetails,
    flavor: FlavorProfile,
    ingredients: Vec<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    categories: Vec<Category>,
    drinks: Vec<StoredDrink>,
    recipes: Vec<Recipe>,
    users: Vec<User>,
}

/// In-memory implementation of [`super::CatalogStore`].
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    inner: RwLock<Inner>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly. Users have no catalog mutation surface;
    /// tests seed them through this.
    pub fn add_user(&self, email: &str, name: Option<&str>, active: bool) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            name: name.map(str::to_owned),
            active,
            created_at: Utc::now(),
        };
        self.inner.write().unwrap().users.push(user.clone());
        user
    }
}

fn resolve(inner: &Inner, drink: &StoredDrink) -> Drink {
    // Dangling references resolve to None, same as the LEFT JOIN
    let category = drink.category_id.and_then(|cid| {
        inner.categories.iter().find(|c| c.id == cid).map(|c| CategoryRef {
            id: c.id,
            name: c.name.clone(),
            image_url: c.image_url.clone(),
        })
    });

    Drink {
        id: drink.id,
        name: drink.name.clone(),
        category_id: drink.category_id,
        category,
        details: drink.details.clone(),
        flavor: drink.flavor.clone(),
        ingredients: drink.ingredients.clone(),
        image_url: drink.image_url.clone(),
        created_at: drink.created_at,
    }
}

#[async_trait]
impl CategoryStore for MemoryCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
        Ok(self.inner.read().unwrap().categories.clone())
    }

    async fn get_category(&self, id: Uuid) -> Result<Category, DbError> {
        self.inner
            .read()
            .unwrap()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| DbError::NotFound {
                resource: "category",
                id: id.to_string(),
            })
    }

    async fn category_exists(&self, id: Uuid) -> Result<bool, DbError> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .categories
            .iter()
            .any(|c| c.id == id))
    }

    async fn create_category(
        &self,
        name: CategoryName,
        image_url: Option<String>,
    ) -> Result<Category, DbError> {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.into_string(),
            image_url,
            created_at: Utc::now(),
        };
        self.inner.write().unwrap().categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        name: CategoryName,
        image_url: Option<String>,
    ) -> Result<Category, DbError> {
        let mut inner = self.inner.write().unwrap();
        let category = inner
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DbError::NotFound {
                resource: "category",
                id: id.to_string(),
            })?;

        category.name = name.into_string();
        if let Some(url) = image_url {
            category.image_url = Some(url);
        }

        Ok(category.clone())
    }

    async fn delete_category(&self, id: Uuid) -> Result<Option<String>, DbError> {
        let mut inner = self.inner.write().unwrap();
        let pos = inner
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DbError::NotFound {
                resource: "category",
                id: id.to_string(),
            })?;

        // No cascade: drinks keep their now-dangling category_id
        Ok(inner.categories.remove(pos).image_url)
    }
}

#[async_trait]
impl DrinkStore for MemoryCatalog {
    async fn list_drinks(&self) -> Result<Vec<Drink>, DbError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.drinks.iter().map(|d| resolve(&inner, d)).collect())
    }

    async fn get_drink(&self, id: Uuid) -> Result<Drink, DbError> {
        let inner = self.inner.read().unwrap();
        inner
            .drinks
            .iter()
            .find(|d| d.id == id)
            .map(|d| resolve(&inner, d))
            .ok_or_else(|| DbError::NotFound {
                resource: "drink",
                id: id.to_string(),
            })
    }

    async fn create_drink(
        &self,
        input: NewDrink,
        image_url: Option<String>,
    ) -> Result<Drink, DbError> {
        let mut inner = self.inner.write().unwrap();
        let drink = StoredDrink {
            id: Uuid::new_v4(),
            name: input.name.into_string(),
            category_id: input.category_id,
            details: input.details,
            flavor: input.flavor,
            ingredients: input.ingredients,
            image_url,
            created_at: Utc::now(),
        };
        let resolved = resolve(&inner, &drink);
        inner.drinks.push(drink);
        Ok(resolved)
    }

    async fn update_drink(
        &self,
        id: Uuid,
        input: NewDrink,
        image_url: Option<String>,
    ) -> Result<Drink, DbError> {
        let mut inner = self.inner.write().unwrap();
        let pos = inner
            .drinks
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DbError::NotFound {
                resource: "drink",
                id: id.to_string(),
            })?;

        let drink = &mut inner.drinks[pos];
        drink.name = input.name.into_string();
        drink.category_id = input.category_id;
        drink.details = input.details;
        drink.flavor = input.flavor;
        drink.ingredients = input.ingredients;
        if let Some(url) = image_url {
            drink.image_url = Some(url);
        }

        let drink = inner.drinks[pos].clone();
        Ok(resolve(&inner, &drink))
    }

    async fn delete_drink(&self, id: Uuid) -> Result<Option<String>, DbError> {
        let mut inner = self.inner.write().unwrap();
        let pos = inner
            .drinks
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DbError::NotFound {
                resource: "drink",
                id: id.to_string(),
            })?;

        Ok(inner.drinks.remove(pos).image_url)
    }
}

#[async_trait]
impl RecipeStore for MemoryCatalog {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, DbError> {
        let mut recipes = self.inner.read().unwrap().recipes.clone();
        recipes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(recipes)
    }

    async fn create_recipe(&self, input: NewRecipe) -> Result<Recipe, DbError> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            name: input.name,
            ingredients: input.ingredients,
            instructions: input.instructions,
            description: input.description,
            created_at: Utc::now(),
        };
        self.inner.write().unwrap().recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn update_recipe(&self, id: Uuid, input: NewRecipe) -> Result<Recipe, DbError> {
        let mut inner = self.inner.write().unwrap();
        let recipe = inner
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DbError::NotFound {
                resource: "recipe",
                id: id.to_string(),
            })?;

        recipe.name = input.name;
        recipe.ingredients = input.ingredients;
        recipe.instructions = input.instructions;
        recipe.description = input.description;

        Ok(recipe.clone())
    }

    async fn delete_recipe(&self, id: Uuid) -> Result<(), DbError> {
        let mut inner = self.inner.write().unwrap();
        let pos = inner
            .recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| DbError::NotFound {
                resource: "recipe",
                id: id.to_string(),
            })?;

        inner.recipes.remove(pos);
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryCatalog {
    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        // Insertion order is creation order; newest first
        let inner = self.inner.read().unwrap();
        Ok(inner.users.iter().rev().cloned().collect())
    }
}

#[async_trait]
impl StatsStore for MemoryCatalog {
    async fn count_users(&self) -> Result<i64, DbError> {
        Ok(self.inner.read().unwrap().users.len() as i64)
    }

    async fn count_active_users(&self) -> Result<i64, DbError> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .users
            .iter()
            .filter(|u| u.active)
            .count() as i64)
    }

    async fn count_recipes(&self) -> Result<i64, DbError> {
        Ok(self.inner.read().unwrap().recipes.len() as i64)
    }

    async fn count_categories(&self) -> Result<i64, DbError> {
        Ok(self.inner.read().unwrap().categories.len() as i64)
    }

    async fn count_drinks(&self) -> Result<i64, DbError> {
        Ok(self.inner.read().unwrap().drinks.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DrinkName;

    fn new_drink(name: &str, category_id: Option<Uuid>) -> NewDrink {
        NewDrink {
            name: DrinkName::new(name).unwrap(),
            category_id,
            details: DrinkDetails::default(),
            flavor: FlavorProfile::default(),
            ingredients: vec![],
        }
    }

    #[tokio::test]
    async fn dangling_category_resolves_to_none() {
        let store = MemoryCatalog::new();
        let category = store
            .create_category(CategoryName::new("Sours").unwrap(), None)
            .await
            .unwrap();

        store
            .create_drink(new_drink("Whiskey Sour", Some(category.id)), None)
            .await
            .unwrap();

        store.delete_category(category.id).await.unwrap();

        let drinks = store.list_drinks().await.unwrap();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].category_id, Some(category.id));
        assert!(drinks[0].category.is_none());
    }

    #[tokio::test]
    async fn update_without_image_keeps_existing() {
        let store = MemoryCatalog::new();
        let category = store
            .create_category(
                CategoryName::new("Highballs").unwrap(),
                Some("/uploads/a.png".into()),
            )
            .await
            .unwrap();

        let updated = store
            .update_category(category.id, CategoryName::new("Tall").unwrap(), None)
            .await
            .unwrap();

        assert_eq!(updated.name, "Tall");
        assert_eq!(updated.image_url.as_deref(), Some("/uploads/a.png"));
    }

    #[tokio::test]
    async fn recipes_sorted_by_name() {
        let store = MemoryCatalog::new();
        for name in ["Zombie Mix", "Agave Syrup"] {
            store
                .create_recipe(NewRecipe {
                    name: name.into(),
                    ingredients: vec!["x".into()],
                    instructions: vec!["y".into()],
                    description: None,
                })
                .await
                .unwrap();
        }

        let recipes = store.list_recipes().await.unwrap();
        assert_eq!(recipes[0].name, "Agave Syrup");
        assert_eq!(recipes[1].name, "Zombie Mix");
    }

    #[tokio::test]
    async fn counts_track_entities() {
        let store = MemoryCatalog::new();
        store.add_user("a@example.com", None, true);
        store.add_user("b@example.com", None, false);

        assert_eq!(store.count_users().await.unwrap(), 2);
        assert_eq!(store.count_active_users().await.unwrap(), 1);
        assert_eq!(store.count_drinks().await.unwrap(), 0);
    }
}
