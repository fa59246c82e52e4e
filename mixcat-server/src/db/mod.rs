//! Storage layer - connection pool, migrations, and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Drink lists resolve their category via LEFT JOIN - no N+1 queries
//! - Handlers depend on the [`CatalogStore`] trait, injected as
//!   `Arc<dyn CatalogStore>`, so the PostgreSQL backend can be swapped
//!   for [`MemoryCatalog`] in tests

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;

use sqlx::PgPool;

/// PostgreSQL-backed catalog store.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
