//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Pools are created
//! lazily: the first query opens the first connection.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::connection::{ConfigError, ConnectionStrategy};
use super::repos::DbError;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a lazily connecting PostgreSQL pool for `strategy`.
///
/// # Errors
///
/// Returns an error if the strategy's URL or port cannot be parsed. No
/// connection is attempted here.
///
/// # Example
///
/// ```ignore
/// let strategy = select(&EnvSnapshot::from_process())?;
/// let pool = create_pool(&strategy)?;
/// ```
pub fn create_pool(strategy: &ConnectionStrategy) -> Result<PgPool, ConfigError> {
    create_pool_with_options(strategy, DEFAULT_MAX_CONNECTIONS)
}

/// Create a lazily connecting pool with a custom connection limit.
pub fn create_pool_with_options(
    strategy: &ConnectionStrategy,
    max_connections: u32,
) -> Result<PgPool, ConfigError> {
    let options = strategy.connect_options()?;
    Ok(PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy_with(options))
}

/// Round-trip `SELECT 1` to confirm the store is reachable.
pub async fn ping(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}
