//! Database migrations for catalog tables

use sqlx::PgPool;

/// Run all catalog migrations.
///
/// Statements are idempotent; this runs at every startup.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running catalog migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            image_url TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // No foreign key on category_id: a drink keeps its reference when the
    // category is deleted, and reads tolerate the dangling id.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS drinks (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            category_id UUID,
            price DOUBLE PRECISION,
            volume DOUBLE PRECISION,
            alcohol_content DOUBLE PRECISION,
            description TEXT,
            acid DOUBLE PRECISION NOT NULL DEFAULT 0,
            sugar DOUBLE PRECISION NOT NULL DEFAULT 0,
            creamy DOUBLE PRECISION NOT NULL DEFAULT 0,
            spicy DOUBLE PRECISION NOT NULL DEFAULT 0,
            bitter DOUBLE PRECISION NOT NULL DEFAULT 0,
            ingredients TEXT[] NOT NULL DEFAULT '{}',
            image_url TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            ingredients TEXT[] NOT NULL,
            instructions TEXT[] NOT NULL,
            description TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email TEXT NOT NULL UNIQUE,
            name TEXT,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Catalog migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_drinks_category ON drinks(category_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_name ON recipes(name)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_users_active ON users(active) WHERE active",
    )
    .execute(pool)
    .await?;

    Ok(())
}
