// src/generators/password.rs
use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use thiserror::Error;

use crate::models::{PasswordGenerationOptions, StrengthLevel};

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
/// Fixed punctuation set shared by generation and scoring.
pub const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Requested lengths are clamped into this range rather than rejected.
pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Select at least one character type")]
    NoCharacterClassSelected,
}

pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    /// Build a random password from the selected character classes.
    ///
    /// Every character is drawn independently and uniformly from the union
    /// alphabet using the OS entropy source; the output is a real secret, so
    /// a general-purpose PRNG is not acceptable here.
    pub fn generate(
        &self,
        options: &PasswordGenerationOptions,
    ) -> Result<String, GenerateError> {
        let mut chars = Vec::new();

        if options.include_uppercase {
            chars.extend_from_slice(UPPERCASE);
        }
        if options.include_lowercase {
            chars.extend_from_slice(LOWERCASE);
        }
        if options.include_numbers {
            chars.extend_from_slice(DIGITS);
        }
        if options.include_symbols {
            chars.extend_from_slice(SYMBOLS);
        }

        if chars.is_empty() {
            return Err(GenerateError::NoCharacterClassSelected);
        }

        let length = options.length.clamp(MIN_LENGTH, MAX_LENGTH);
        let dist = Uniform::from(0..chars.len());
        let mut rng = OsRng;

        Ok((0..length)
            .map(|_| chars[dist.sample(&mut rng)] as char)
            .collect())
    }

    /// Classify password strength from six one-point criteria. Pure: same
    /// input, same result.
    pub fn score(&self, password: &str) -> StrengthLevel {
        let length = password.chars().count();
        let mut points = 0;

        if length >= 8 {
            points += 1;
        }
        if length >= 12 {
            points += 1;
        }
        if password.chars().any(|c| c.is_ascii_uppercase()) {
            points += 1;
        }
        if password.chars().any(|c| c.is_ascii_lowercase()) {
            points += 1;
        }
        if password.chars().any(|c| c.is_ascii_digit()) {
            points += 1;
        }
        if password.bytes().any(|b| SYMBOLS.contains(&b)) {
            points += 1;
        }

        match points {
            0..=2 => StrengthLevel::Weak,
            3..=4 => StrengthLevel::Medium,
            5 => StrengthLevel::Strong,
            _ => StrengthLevel::VeryStrong,
        }
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}
