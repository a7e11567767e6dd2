use clap::Parser;
use std::path::Path;

mod cli;
mod core;
mod generators;
mod models;
mod store;
mod utils;
mod validate;

use crate::cli::Args;
use crate::core::config::Config;
use crate::store::{CredentialStore, FileBackend};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let config = Config::load(&args);

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .init();

    log::info!("🔐 Starting CredVault - Password Generator & Account Store");
    log::debug!("Account file: {}", config.store_path.display());

    let backend = FileBackend::new(config.store_path.clone());
    let mut store = CredentialStore::new(Box::new(backend), config.credential_policy);
    store.load();

    if store.is_empty() {
        log::info!("No existing accounts, starting with an empty store");
    } else {
        log::info!("Loaded {} account(s)", store.len());
    }

    cli::menu::run_cli_menu(&mut store, &config)?;

    log::info!("✅ CredVault shutdown complete");
    Ok(())
}
