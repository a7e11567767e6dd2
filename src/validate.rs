// src/validate.rs

/// Basic display-name validation: at least 2 non-whitespace characters,
/// letters and spaces only.
pub fn valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.chars().filter(|c| !c.is_whitespace()).count() >= 2
        && trimmed.chars().all(|c| c.is_alphabetic() || c == ' ')
}

/// Credential-format rule, chosen per deployment. The store enforces the
/// configured policy on `register`; nothing else in the core hard-codes a
/// credential shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialPolicy {
    /// Exactly 4 ASCII digits.
    #[default]
    FourDigits,
    /// Minimal email shape: one `@`, non-empty local part, domain with a dot.
    Email,
    /// Anything non-empty.
    AnyNonEmpty,
}

impl CredentialPolicy {
    pub fn accepts(&self, credential: &str) -> bool {
        match self {
            CredentialPolicy::FourDigits => {
                credential.len() == 4 && credential.chars().all(|c| c.is_ascii_digit())
            }
            CredentialPolicy::Email => {
                let mut parts = credential.splitn(2, '@');
                match (parts.next(), parts.next()) {
                    (Some(local), Some(domain)) => {
                        !local.is_empty()
                            && !domain.is_empty()
                            && !domain.starts_with('.')
                            && !domain.ends_with('.')
                            && domain.contains('.')
                            && !domain.contains('@')
                    }
                    _ => false,
                }
            }
            CredentialPolicy::AnyNonEmpty => !credential.trim().is_empty(),
        }
    }

    /// Human-readable requirement, shown when the rule is not met.
    pub fn requirement(&self) -> &'static str {
        match self {
            CredentialPolicy::FourDigits => "exactly 4 digits",
            CredentialPolicy::Email => "a valid email address",
            CredentialPolicy::AnyNonEmpty => "a non-empty value",
        }
    }
}

impl std::str::FromStr for CredentialPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "4digits" | "four-digits" | "pin" => Ok(CredentialPolicy::FourDigits),
            "email" => Ok(CredentialPolicy::Email),
            "any" | "none" => Ok(CredentialPolicy::AnyNonEmpty),
            other => Err(format!("unknown credential policy '{other}'")),
        }
    }
}
