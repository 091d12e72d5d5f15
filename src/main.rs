//! TakerBOT - hourly light-mining bot for Taker
//!
//! # WARNING
//! - wallets.json holds raw private keys. Keep it out of version control.
//! - Every activation is a real transaction paying gas on Taker mainnet.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use taker_bot::cli::commands;
use taker_bot::config::Config;
use taker_bot::logging;

/// TakerBOT - light-mining automation
#[derive(Parser)]
#[command(name = "taker-bot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Run a command directly instead of showing the menu
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert data/wallet.txt into data/wallets.json
    Convert,

    /// Start the hourly mining loop
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    logging::init()?;

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Convert) => commands::convert(&config).map(|_| ()),
        Some(Commands::Run) => commands::run_bot(&config).await,
        None => commands::interactive(&config).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
