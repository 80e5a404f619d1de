use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show which database connection the environment selects (passwords masked)
    Show,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => run_show(),
    }
}

fn run_show() -> Result<()> {
    let strategy = super::resolve_strategy()?;
    strategy
        .connect_options()
        .context("Invalid database configuration")?;

    println!("{}", strategy.describe());
    Ok(())
}
