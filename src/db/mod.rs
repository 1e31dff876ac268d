// src/db/mod.rs

//! Database pool construction and embedded migrations.

pub mod seed;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Schema migrations, embedded at compile time from `migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn connect(config: &AppConfig) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .connect(&config.database_url)
    .await?;
  Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> Result<()> {
  MIGRATOR
    .run(pool)
    .await
    .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;
  tracing::info!("Database migrations applied.");
  Ok(())
}
