//! CSV export command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncWriteExt;

use regdesk_server::export::export_document;

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Write the registrations CSV to a file or stdout
pub async fn run_export(args: ExportArgs) -> Result<()> {
    let pool = super::resolve_pool(None)?;

    let csv = export_document(&pool)
        .await
        .context("Failed to export registrations")?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, csv.as_bytes())
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote registrations to {}", path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(csv.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
