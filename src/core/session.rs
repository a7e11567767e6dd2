// src/core/session.rs
use crate::models::Account;

/// Explicit session value returned by `register`/`authenticate`. Callers
/// hold it and pass the key back into store operations; the core carries no
/// ambient current-user state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub account_key: String,
    pub name: String,
    pub user_id: String,
}

impl Session {
    pub(crate) fn for_account(key: &str, account: &Account) -> Self {
        Self {
            account_key: key.to_string(),
            name: account.name.clone(),
            user_id: account.user_id.clone(),
        }
    }
}
