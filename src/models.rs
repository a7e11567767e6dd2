// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One registered account. Owns its saved-secret entries by containment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    // Older account files may predate the name field.
    #[serde(default)]
    pub name: String,
    pub credential: String,
    pub user_id: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub saved_passwords: Vec<SavedSecret>,
}

/// One stored (label, secret) pair. Entries are append-only: never edited
/// or removed once saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSecret {
    pub website: String,
    #[serde(default)]
    pub username: Option<String>,
    pub password: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    // Cached at save time so listing does not re-score.
    #[serde(default)]
    pub strength: StrengthLevel,
}

/// Strength classification derived from the fixed six-point rubric.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StrengthLevel {
    #[default]
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrengthLevel::Weak => write!(f, "🔴 Weak"),
            StrengthLevel::Medium => write!(f, "🟡 Medium"),
            StrengthLevel::Strong => write!(f, "🟢 Strong"),
            StrengthLevel::VeryStrong => write!(f, "💚 Very Strong"),
        }
    }
}

// Password generation options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordGenerationOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for PasswordGenerationOptions {
    fn default() -> Self {
        Self {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}
