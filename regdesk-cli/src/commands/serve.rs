//! HTTP server command

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use regdesk_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3000)
    #[arg(long, short = 'b', env = "REGDESK_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Maximum database connections in the pool (default: 5)
    #[arg(long)]
    pub max_connections: Option<u32>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    // Configuration problems are fatal before the listener starts.
    let pool = super::resolve_pool(args.max_connections)?;

    tracing::info!("Starting regdesk server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
