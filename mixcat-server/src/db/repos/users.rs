//! User repository
//!
//! Users are created by the authentication system, which sits in front of
//! this service. The catalog only lists and counts them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::PgCatalog;

use super::DbError;

/// User record from storage
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// User read operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// List all users, most recently created first.
    async fn list_users(&self) -> Result<Vec<User>, DbError>;
}

#[async_trait]
impl UserStore for PgCatalog {
    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, active, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(users)
    }
}
