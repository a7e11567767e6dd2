// src/cli/mod.rs
use std::path::PathBuf;

use clap::Parser;

use crate::validate::CredentialPolicy;

pub mod menu;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path of the account file
    #[arg(long, short, env = "CREDVAULT_STORE")]
    pub store: Option<PathBuf>,

    /// Credential-format policy for registration (4digits, email, any)
    #[arg(long)]
    pub policy: Option<CredentialPolicy>,
}
