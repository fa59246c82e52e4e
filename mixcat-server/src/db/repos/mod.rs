//! Repository traits and implementations
//!
//! One trait per entity, combined into [`CatalogStore`] for injection into
//! the HTTP layer. Patterns shared by the PostgreSQL implementations:
//! - list operations resolve relations via JOINs (no N+1)
//! - writes return the affected row via RETURNING (no re-query)
//! - missing rows surface as `DbError::NotFound`, never as a generic error

pub mod categories;
pub mod drinks;
pub mod memory;
pub mod recipes;
pub mod stats;
pub mod users;

pub use categories::{Category, CategoryStore};
pub use drinks::{CategoryRef, Drink, DrinkStore};
pub use memory::MemoryCatalog;
pub use recipes::{Recipe, RecipeStore};
pub use stats::StatsStore;
pub use users::{User, UserStore};

/// Storage error type shared by all repositories.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

/// Everything the HTTP layer needs from storage, as one injectable object.
pub trait CatalogStore:
    CategoryStore + DrinkStore + RecipeStore + UserStore + StatsStore
{
}

impl<T> CatalogStore for T where
    T: CategoryStore + DrinkStore + RecipeStore + UserStore + StatsStore
{
}
