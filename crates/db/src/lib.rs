//! `trail-db` -- PostgreSQL storage for versioned records.
//!
//! Provides pool setup and migrations, the [`models::document::Document`]
//! versioned entity, its repository, and [`store::PgDocumentStore`], the
//! [`trail_core::store::VersionStore`] implementation used by the
//! lifecycle controller.

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

pub use config::DbConfig;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    create_pool_with(&DbConfig {
        database_url: database_url.to_string(),
        max_connections: config::DEFAULT_MAX_CONNECTIONS,
    })
    .await
}

/// Create a connection pool from a loaded [`DbConfig`].
pub async fn create_pool_with(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    tracing::debug!(max_connections = config.max_connections, "Creating database pool");
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
