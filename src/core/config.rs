// src/core/config.rs
use std::env;
use std::path::PathBuf;

use log::LevelFilter;

use crate::cli::Args;
use crate::validate::CredentialPolicy;

// Configuration for the vault
#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub store_path: PathBuf,

    // Registration policy
    pub credential_policy: CredentialPolicy,

    // Password Generation
    pub default_password_length: usize,

    // Logging
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            credential_policy: CredentialPolicy::FourDigits,
            default_password_length: 16,
            log_level: LevelFilter::Info,
        }
    }
}

fn default_store_path() -> PathBuf {
    crate::utils::get_app_config_dir()
        .map(|dir| dir.join("accounts.json"))
        .unwrap_or_else(|| PathBuf::from("./accounts.json"))
}

impl Config {
    // Load configuration from environment variables, then CLI overrides
    pub fn load(args: &Args) -> Self {
        let mut config = Config::default();

        if let Ok(policy) = env::var("CREDENTIAL_POLICY") {
            match policy.parse() {
                Ok(policy) => config.credential_policy = policy,
                Err(e) => log::warn!("{e}, keeping default"),
            }
        }

        if let Ok(val) = env::var("DEFAULT_PASSWORD_LENGTH") {
            match val.parse() {
                Ok(length) => config.default_password_length = length,
                Err(_) => {
                    log::warn!("Invalid DEFAULT_PASSWORD_LENGTH '{val}', keeping default")
                }
            }
        }

        if let Ok(level) = env::var("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => {}
            }
        }

        // CLI flags win over the environment
        if let Some(path) = &args.store {
            config.store_path = path.clone();
        }
        if let Some(policy) = args.policy {
            config.credential_policy = policy;
        }

        config
    }
}
