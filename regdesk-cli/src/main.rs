//! regdesk CLI - registration intake server and export tooling
//!
//! - `serve`: run the HTTP submit/export endpoints
//! - `export`: write the registrations CSV to a file or stdout
//! - `config`: inspect which database connection the environment selects

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "regdesk",
    author,
    version,
    about = "Registration intake over HTTP with CSV export",
    long_about = "Accept form registrations as JSON, store them in PostgreSQL, \
                  and export them as CSV. Connection settings come from POSTGRES_* \
                  or DATABASE_URL (a .env file in the working directory is loaded first)."
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (submit, export, health)
    Serve(commands::serve::ServeArgs),
    /// Export all registrations as CSV, newest first
    Export(commands::export::ExportArgs),
    /// Inspect connection configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Export(args) => commands::export::run_export(args).await,
        Commands::Config(args) => commands::config::run_config(args),
    }
}
