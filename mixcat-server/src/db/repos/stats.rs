//! Count queries backing the dashboard aggregation
//!
//! Each count is an independent query with no cross-count snapshot
//! guarantee. The concurrent fan-out over these five methods lives in the
//! stats handler; the repository only promises that each count either
//! succeeds or reports its own failure.

use async_trait::async_trait;

use crate::db::PgCatalog;

use super::DbError;

/// Independent entity counts for the dashboard.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn count_users(&self) -> Result<i64, DbError>;
    async fn count_active_users(&self) -> Result<i64, DbError>;
    async fn count_recipes(&self) -> Result<i64, DbError>;
    async fn count_categories(&self) -> Result<i64, DbError>;
    async fn count_drinks(&self) -> Result<i64, DbError>;
}

async fn count(pg: &PgCatalog, query: &str) -> Result<i64, DbError> {
    let row: (i64,) = sqlx::query_as(query).fetch_one(pg.pool()).await?;
    Ok(row.0)
}

#[async_trait]
impl StatsStore for PgCatalog {
    async fn count_users(&self) -> Result<i64, DbError> {
        count(self, "SELECT COUNT(*) FROM users").await
    }

    async fn count_active_users(&self) -> Result<i64, DbError> {
        count(self, "SELECT COUNT(*) FROM users WHERE active").await
    }

    async fn count_recipes(&self) -> Result<i64, DbError> {
        count(self, "SELECT COUNT(*) FROM recipes").await
    }

    async fn count_categories(&self) -> Result<i64, DbError> {
        count(self, "SELECT COUNT(*) FROM categories").await
    }

    async fn count_drinks(&self) -> Result<i64, DbError> {
        count(self, "SELECT COUNT(*) FROM drinks").await
    }
}
