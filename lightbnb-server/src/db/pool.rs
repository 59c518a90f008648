//! PostgreSQL pool for the gateway
//!
//! The pool is built by the caller and handed to `PgGateway::new`; nothing
//! in the crate holds a global connection.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connections opened when config does not say otherwise.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect with the default pool size.
///
/// ```ignore
/// let gateway = PgGateway::new(create_pool("postgres://localhost/lightbnb").await?);
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect with at most `max_connections` open connections.
///
/// Fails on a malformed URL or when the first connection cannot be made.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "connecting to database");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
