//! Subcommand implementations

pub mod config;
pub mod export;
pub mod serve;

use anyhow::{Context, Result};
use regdesk_server::db::create_pool_with_options;
use regdesk_server::{create_pool, select, ConnectionStrategy, EnvSnapshot, PgPool};

/// Resolve the connection strategy from the process environment.
pub fn resolve_strategy() -> Result<ConnectionStrategy> {
    let strategy = select(&EnvSnapshot::from_process())
        .context("Cannot determine database connection")?;
    tracing::info!(connection = %strategy.describe(), "Database connection selected");
    Ok(strategy)
}

/// Resolve the strategy and build a lazily connecting pool.
pub fn resolve_pool(max_connections: Option<u32>) -> Result<PgPool> {
    let strategy = resolve_strategy()?;
    let pool = match max_connections {
        Some(max) => create_pool_with_options(&strategy, max),
        None => create_pool(&strategy),
    }
    .context("Invalid database configuration")?;
    Ok(pool)
}
