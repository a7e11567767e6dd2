// src/cli/menu.rs
use anyhow::Result;
use chrono::Utc;
use console::style;
use inquire::{Confirm, CustomType, MultiSelect, Password, Select, Text};

use crate::core::config::Config;
use crate::core::session::Session;
use crate::generators::{PasswordGenerator, MAX_LENGTH, MIN_LENGTH};
use crate::models::{PasswordGenerationOptions, SavedSecret};
use crate::store::{CredentialStore, StoreError};
use crate::utils::{format_time_ago, truncate_string};

pub fn run_cli_menu(store: &mut CredentialStore, config: &Config) -> Result<()> {
    println!("🔐 Welcome to");
    println!("╔══════════════════════════════════════╗");
    println!("║         🔐 CREDVAULT MANAGER         ║");
    println!("╚══════════════════════════════════════╝");

    loop {
        let session = match login_menu(store)? {
            Some(session) => session,
            None => break,
        };

        println!("👋 Welcome, {}!", style(&session.name).green().bold());
        println!("🆔 Your user ID: {}", session.user_id);

        // Returns false when the user picked Quit rather than Logout.
        if !main_menu(store, config, &session)? {
            break;
        }
        println!("🚪 Logged out.");
    }

    println!("👋 Goodbye!");
    Ok(())
}

fn login_menu(store: &mut CredentialStore) -> Result<Option<Session>> {
    loop {
        let choice = Select::new(
            "Get started:",
            vec![
                "🚀 Create account",
                "👤 Returning user",
                "🚪 Quit",
            ],
        )
        .prompt()?;

        match choice {
            "🚀 Create account" => {
                if let Some(session) = create_account(store)? {
                    return Ok(Some(session));
                }
            }
            "👤 Returning user" => {
                if let Some(session) = returning_user(store)? {
                    return Ok(Some(session));
                }
            }
            _ => return Ok(None),
        }
    }
}

fn create_account(store: &mut CredentialStore) -> Result<Option<Session>> {
    let name = Text::new("Your name:").prompt()?;
    let credential = Password::new("Password:")
        .with_display_mode(inquire::PasswordDisplayMode::Hidden)
        .without_confirmation()
        .prompt()?;
    let credential = credential.trim().to_string();

    // The credential doubles as the account key, matching the behavior the
    // rest of the flow depends on.
    match store.register(&credential, name.trim(), &credential) {
        Ok(session) => {
            println!("✅ Account created successfully!");
            println!("🆔 User ID: {}", session.user_id);
            Ok(Some(session))
        }
        Err(StoreError::DuplicateKey) => {
            let sign_in = Confirm::new(
                "An account with this password already exists. Sign in instead?",
            )
            .with_default(true)
            .prompt()?;

            if sign_in {
                match store.authenticate(&credential) {
                    Ok(session) => return Ok(Some(session)),
                    Err(e) => println!("❌ {e}"),
                }
            }
            Ok(None)
        }
        Err(e) => {
            println!("❌ {e}");
            Ok(None)
        }
    }
}

fn returning_user(store: &mut CredentialStore) -> Result<Option<Session>> {
    let credential = Password::new("Enter your password:")
        .with_display_mode(inquire::PasswordDisplayMode::Hidden)
        .without_confirmation()
        .prompt()?;

    match store.authenticate(credential.trim()) {
        Ok(session) => {
            println!("✅ Welcome back, {}!", session.name);
            Ok(Some(session))
        }
        Err(e) => {
            println!("❌ {e}");
            println!("Please check your password or create a new account.");
            Ok(None)
        }
    }
}

fn main_menu(store: &mut CredentialStore, config: &Config, session: &Session) -> Result<bool> {
    let generator = PasswordGenerator::new();

    loop {
        let choice = Select::new(
            "What would you like to do?",
            vec![
                "🎲 Generate password",
                "💾 View saved passwords",
                "🚪 Logout",
                "❌ Quit",
            ],
        )
        .prompt()?;

        match choice {
            "🎲 Generate password" => {
                generate_password(store, config, session, &generator)?;
            }
            "💾 View saved passwords" => {
                view_saved_passwords(store, session)?;
            }
            "🚪 Logout" => return Ok(true),
            _ => return Ok(false),
        }
    }
}

const CLASS_CHOICES: [&str; 4] = [
    "🔤 Uppercase (A-Z)",
    "🔡 Lowercase (a-z)",
    "🔢 Numbers (0-9)",
    "🔣 Symbols (!@#$%)",
];

fn generate_password(
    store: &mut CredentialStore,
    config: &Config,
    session: &Session,
    generator: &PasswordGenerator,
) -> Result<()> {
    let length = CustomType::<usize>::new(&format!(
        "Password length ({MIN_LENGTH}-{MAX_LENGTH}):"
    ))
    .with_default(config.default_password_length)
    .with_error_message("Please enter a number")
    .prompt()?;

    let selected = MultiSelect::new("Character options:", CLASS_CHOICES.to_vec())
        .with_default(&[0, 1, 2, 3])
        .prompt()?;

    let options = PasswordGenerationOptions {
        length,
        include_uppercase: selected.contains(&CLASS_CHOICES[0]),
        include_lowercase: selected.contains(&CLASS_CHOICES[1]),
        include_numbers: selected.contains(&CLASS_CHOICES[2]),
        include_symbols: selected.contains(&CLASS_CHOICES[3]),
    };

    let password = match generator.generate(&options) {
        Ok(password) => password,
        Err(e) => {
            println!("⚠️  {e}");
            return Ok(());
        }
    };

    let strength = generator.score(&password);
    println!("🔑 {}", style(&password).green().bold());
    println!("💪 Strength: {strength}");

    let save = Confirm::new("Save this password?")
        .with_default(false)
        .prompt()?;
    if !save {
        return Ok(());
    }

    let website = Text::new("Website/service name:").prompt()?;
    if website.trim().is_empty() {
        println!("⚠️  No website entered, password not saved.");
        return Ok(());
    }
    let username = Text::new("Username/email (optional):").prompt()?;
    let username = if username.trim().is_empty() {
        None
    } else {
        Some(username.trim().to_string())
    };

    let entry = SavedSecret {
        website: website.trim().to_string(),
        username,
        password,
        created_at: Utc::now(),
        strength,
    };

    match store.append_secret(&session.account_key, entry) {
        Ok(()) => println!("💾 Password saved for {}", website.trim()),
        Err(e) => println!("❌ Could not save password: {e}"),
    }
    Ok(())
}

fn view_saved_passwords(store: &CredentialStore, session: &Session) -> Result<()> {
    let secrets = match store.secrets_of(&session.account_key) {
        Ok(secrets) => secrets,
        Err(e) => {
            println!("❌ {e}");
            return Ok(());
        }
    };

    if secrets.is_empty() {
        println!("📭 No saved passwords found.");
        return Ok(());
    }

    println!("💾 Your saved passwords:");
    for entry in secrets {
        println!("═══════════════════════════════════════");
        println!("🌐 Website:  {}", truncate_string(&entry.website, 40));
        println!(
            "👤 Username: {}",
            entry.username.as_deref().unwrap_or("N/A")
        );
        println!("🔑 Password: {}", entry.password);
        println!("💪 Strength: {}", entry.strength);
        println!("📅 Created:  {}", format_time_ago(entry.created_at));
    }
    println!("═══════════════════════════════════════");
    Ok(())
}
