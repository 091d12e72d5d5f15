//! CLI command implementations

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Select;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, Instrument};

use crate::api::{ApiClient, TakerApi};
use crate::bot::{Scheduler, WalletProcessor};
use crate::chain::ChainClient;
use crate::config::Config;
use crate::logging::{CONVERTER_COMPONENT, DEFAULT_COMPONENT};
use crate::wallet::{convert_file, load_wallets};

const MENU_ITEMS: [&str; 3] = ["Convert Wallet", "TakerBOT", "Exit"];

const BANNER: &str = r#"
         /$$   /$$ /$$$$$$$$        /$$$$$$$ /$$$$$$$$ /$$$$$$$
        | $$  | $$|____ /$$/       /$$_____/|____ /$$/| $$__  $$
        | $$  | $$   /$$$$/       |  $$$$$$    /$$$$/ | $$  \ $$
        | $$  | $$  /$$__/         \____  $$  /$$__/  | $$  | $$
        |  $$$$$$$ /$$$$$$$$       /$$$$$$$/ /$$$$$$$$| $$  | $$
         \____  $$|________/      |_______/ |________/|__/  |__/
        /$$  | $$ ______________________________________________
       |  $$$$$$/ ============ Nothing's Impossible !! =========
        \______/
"#;

/// Entry of the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ConvertWallets,
    RunBot,
    Exit,
}

impl MenuChoice {
    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(MenuChoice::ConvertWallets),
            1 => Some(MenuChoice::RunBot),
            2 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

fn prompt_menu() -> Result<MenuChoice> {
    let index = Select::new()
        .with_prompt("Choose a menu")
        .items(&MENU_ITEMS)
        .default(0)
        .interact()?;

    MenuChoice::from_index(index).ok_or_else(|| anyhow::anyhow!("Invalid menu index {}", index))
}

/// Show the menu until the user exits or starts the bot
pub async fn interactive(config: &Config) -> Result<()> {
    println!("{}", BANNER.green().bold());
    println!("{}", "=".repeat(18).cyan());
    println!("{}", "#### TakerBOT ####".cyan());
    println!("{}", "=".repeat(18).cyan());

    loop {
        match prompt_menu()? {
            MenuChoice::ConvertWallets => {
                if let Err(e) = convert(config) {
                    debug!("Back to menu after failed conversion: {:#}", e);
                }
            }
            MenuChoice::RunBot => return run_bot(config).await,
            MenuChoice::Exit => {
                info!("Exiting...");
                return Ok(());
            }
        }
    }
}

/// Convert the wallet text list into wallets.json
pub fn convert(config: &Config) -> Result<usize> {
    let _span = info_span!(CONVERTER_COMPONENT).entered();
    info!("Starting conversion...");

    match convert_file(&config.paths.wallet_text, &config.paths.wallet_json) {
        Ok(count) => Ok(count),
        Err(e) => {
            error!("Conversion failed: {}", e);
            Err(e.into())
        }
    }
}

/// Start the mining loop; returns only on Ctrl-C or a fatal startup error
pub async fn run_bot(config: &Config) -> Result<()> {
    start(config)
        .instrument(info_span!(DEFAULT_COMPONENT))
        .await
}

async fn start(config: &Config) -> Result<()> {
    info!("Starting TakerBOT...");

    let wallets = load_wallets(&config.paths.wallet_json)
        .context("Cannot start without wallets - run Convert Wallet first")?;

    let chain = ChainClient::new(&config.chain)?;
    let chain_id = chain
        .check_connection()
        .await
        .context("Chain endpoint unreachable")?;
    info!(
        "Connected to chain {} (contract {})",
        chain_id,
        chain.contract()
    );

    let api = TakerApi::new(ApiClient::from_config(&config.api)?);
    let processor = WalletProcessor::new(
        api,
        Arc::new(chain),
        config.api.invitation_code.clone(),
        config.scheduler.cooldown_secs,
    );

    Scheduler::new(processor, wallets, config.scheduler.interval())
        .run()
        .await;

    Ok(())
}
