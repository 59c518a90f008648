//! Embedded schema migrations

use sqlx::migrate::Migrator;
use sqlx::PgPool;

use super::DbError;

/// Migrations from the workspace `migrations/` directory
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Apply any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
