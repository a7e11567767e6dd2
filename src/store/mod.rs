// src/store/mod.rs
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use crate::core::session::Session;
use crate::models::{Account, SavedSecret};
use crate::validate::{self, CredentialPolicy};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("An account with this key already exists")]
    DuplicateKey,

    #[error("No account found for the provided key")]
    NotFound,

    #[error("Invalid name (letters only, 2+ characters)")]
    InvalidName,

    #[error("Invalid credential: expected {0}")]
    InvalidCredentialFormat(&'static str),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Minimal capability over the backing resource: read the whole payload
/// (None when the resource does not exist yet) or overwrite it entirely.
pub trait StorageBackend {
    fn read(&self) -> io::Result<Option<Vec<u8>>>;
    fn write(&mut self, payload: &[u8]) -> io::Result<()>;
}

/// On-disk backend at a fixed, predictable path.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, payload: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, payload)
    }
}

/// In-memory backend, used by tests to exercise the persistence contract
/// without touching the file system.
#[derive(Default)]
pub struct MemoryBackend {
    payload: Option<Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: Vec<u8>) -> Self {
        Self {
            payload: Some(payload),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &[u8]) -> io::Result<()> {
        self.payload = Some(payload.to_vec());
        Ok(())
    }
}

/// Durable mapping of account key to account record.
///
/// The map is held in memory and flushed write-through: every mutating
/// operation persists the full collection before returning, and leaves the
/// in-memory state untouched when persisting fails. `load` re-syncs from the
/// backend at any time. The account key is an opaque caller-chosen string;
/// a BTreeMap keeps serialization deterministically ordered.
pub struct CredentialStore {
    backend: Box<dyn StorageBackend>,
    accounts: BTreeMap<String, Account>,
    policy: CredentialPolicy,
}

impl CredentialStore {
    pub fn new(backend: Box<dyn StorageBackend>, policy: CredentialPolicy) -> Self {
        Self {
            backend,
            accounts: BTreeMap::new(),
            policy,
        }
    }

    /// Read the backing resource. Absent or unparsable content yields an
    /// empty map; corruption is logged, not fatal.
    pub fn load(&mut self) {
        self.accounts = match self.backend.read() {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(accounts) => accounts,
                Err(e) => {
                    log::warn!("Account file is unparsable, starting empty: {e}");
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                log::warn!("Could not read account file, starting empty: {e}");
                BTreeMap::new()
            }
        };
    }

    /// Overwrite the backing resource with the full serialized map,
    /// pretty-printed. Write failures surface as `StorageUnavailable`.
    pub fn save(&mut self) -> Result<()> {
        let payload = serde_json::to_vec_pretty(&self.accounts)
            .map_err(|e| StoreError::StorageUnavailable(e.to_string()))?;
        self.backend
            .write(&payload)
            .map_err(|e| StoreError::StorageUnavailable(e.to_string()))
    }

    /// Create a new account under `key` and persist. Fails without touching
    /// the store when validation fails, the key is taken, or the write fails.
    pub fn register(&mut self, key: &str, name: &str, credential: &str) -> Result<Session> {
        if !validate::valid_name(name) {
            return Err(StoreError::InvalidName);
        }
        if !self.policy.accepts(credential) {
            return Err(StoreError::InvalidCredentialFormat(self.policy.requirement()));
        }
        if self.accounts.contains_key(key) {
            return Err(StoreError::DuplicateKey);
        }

        let account = Account {
            name: name.trim().to_string(),
            credential: credential.to_string(),
            user_id: generate_user_id(),
            created_at: Utc::now(),
            saved_passwords: Vec::new(),
        };
        let session = Session::for_account(key, &account);

        self.accounts.insert(key.to_string(), account);
        if let Err(e) = self.save() {
            self.accounts.remove(key);
            return Err(e);
        }

        log::info!("Registered account {}", session.user_id);
        Ok(session)
    }

    /// Look up the account under `key` and return a session for it.
    pub fn authenticate(&self, key: &str) -> Result<Session> {
        let account = self.accounts.get(key).ok_or(StoreError::NotFound)?;
        Ok(Session::for_account(key, account))
    }

    /// Append a saved-secret entry to the named account and persist.
    pub fn append_secret(&mut self, key: &str, entry: SavedSecret) -> Result<()> {
        let account = self.accounts.get_mut(key).ok_or(StoreError::NotFound)?;
        account.saved_passwords.push(entry);

        if let Err(e) = self.save() {
            // Roll back so callers see the store exactly as before.
            if let Some(account) = self.accounts.get_mut(key) {
                account.saved_passwords.pop();
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Account> {
        self.accounts.get(key)
    }

    /// Saved entries of the named account, oldest first.
    pub fn secrets_of(&self, key: &str) -> Result<&[SavedSecret]> {
        let account = self.accounts.get(key).ok_or(StoreError::NotFound)?;
        Ok(&account.saved_passwords)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Fixed-length hexadecimal account identifier (16 hex chars) drawn from the
/// OS entropy source. Not derived from user input; collision probability is
/// treated as negligible.
pub fn generate_user_id() -> String {
    let mut bytes = [0u8; 8];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StrengthLevel;

    fn memory_store() -> CredentialStore {
        CredentialStore::new(Box::new(MemoryBackend::new()), CredentialPolicy::FourDigits)
    }

    /// Backend whose reads work but whose writes always fail, for
    /// exercising the rollback paths.
    struct FailingBackend {
        payload: Option<Vec<u8>>,
    }

    impl StorageBackend for FailingBackend {
        fn read(&self) -> io::Result<Option<Vec<u8>>> {
            Ok(self.payload.clone())
        }

        fn write(&mut self, _payload: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "disk full"))
        }
    }

    fn entry(website: &str, password: &str) -> SavedSecret {
        SavedSecret {
            website: website.to_string(),
            username: None,
            password: password.to_string(),
            created_at: Utc::now(),
            strength: StrengthLevel::Medium,
        }
    }

    #[test]
    fn register_then_authenticate_returns_same_record() {
        let mut store = memory_store();
        let session = store.register("1234", "Jane Doe", "1234").unwrap();

        let found = store.authenticate("1234").unwrap();
        assert_eq!(found, session);
        assert_eq!(found.name, "Jane Doe");
        assert_eq!(found.user_id.len(), 16);
        assert!(found.user_id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn duplicate_key_fails_and_leaves_store_unchanged() {
        let mut store = memory_store();
        store.register("1234", "Jane Doe", "1234").unwrap();
        let before = store.get("1234").cloned().unwrap();

        let err = store.register("1234", "John Roe", "1234").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1234").unwrap(), &before);
    }

    #[test]
    fn authenticate_unknown_key_is_not_found() {
        let store = memory_store();
        assert!(matches!(
            store.authenticate("0000").unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[test]
    fn register_enforces_name_rule() {
        let mut store = memory_store();
        let err = store.register("1234", "J", "1234").unwrap_err();
        assert!(matches!(err, StoreError::InvalidName));
        assert!(store.is_empty());
    }

    #[test]
    fn register_enforces_credential_policy() {
        let mut store = memory_store();
        let err = store.register("abc", "Jane Doe", "abc").unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentialFormat(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn email_policy_is_pluggable() {
        let mut store =
            CredentialStore::new(Box::new(MemoryBackend::new()), CredentialPolicy::Email);
        assert!(store.register("1234", "Jane Doe", "1234").is_err());
        assert!(store
            .register("jane@example.com", "Jane Doe", "jane@example.com")
            .is_ok());
    }

    #[test]
    fn append_secret_then_reload_keeps_exactly_one_entry() {
        let mut store = memory_store();
        store.register("1234", "Jane Doe", "1234").unwrap();
        store
            .append_secret("1234", entry("example.com", "Xk9!mQ"))
            .unwrap();

        // Re-sync from the backend, as a fresh process would.
        store.load();
        let secrets = store.secrets_of("1234").unwrap();
        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets[0].website, "example.com");
        assert_eq!(secrets[0].password, "Xk9!mQ");
    }

    #[test]
    fn append_secret_to_unknown_account_is_not_found() {
        let mut store = memory_store();
        let err = store
            .append_secret("0000", entry("example.com", "pw"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn corrupt_payload_reads_as_empty() {
        let backend = MemoryBackend::with_payload(b"{not json".to_vec());
        let mut store = CredentialStore::new(Box::new(backend), CredentialPolicy::FourDigits);
        store.load();
        assert!(store.is_empty());
    }

    #[test]
    fn older_shaped_record_loads_with_defaults() {
        // A record written before the name and saved_passwords fields existed.
        let payload = br#"{
            "1234": {
                "credential": "1234",
                "user_id": "a1b2c3d4e5f60718"
            }
        }"#;
        let backend = MemoryBackend::with_payload(payload.to_vec());
        let mut store = CredentialStore::new(Box::new(backend), CredentialPolicy::FourDigits);
        store.load();

        let account = store.get("1234").unwrap();
        assert_eq!(account.name, "");
        assert!(account.saved_passwords.is_empty());
    }

    #[test]
    fn save_after_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");

        let mut store = CredentialStore::new(
            Box::new(FileBackend::new(path.clone())),
            CredentialPolicy::FourDigits,
        );
        store.load();
        store.register("1234", "Jane Doe", "1234").unwrap();
        store
            .append_secret("1234", entry("example.com", "Xk9!mQ"))
            .unwrap();
        let first = fs::read(&path).unwrap();

        store.load();
        store.save().unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn file_backend_starts_empty_when_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("accounts.json");

        let mut store = CredentialStore::new(
            Box::new(FileBackend::new(path.clone())),
            CredentialPolicy::FourDigits,
        );
        store.load();
        assert!(store.is_empty());

        // First save creates the parent directory.
        store.register("1234", "Jane Doe", "1234").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn failed_write_rolls_back_register() {
        let backend = FailingBackend { payload: None };
        let mut store = CredentialStore::new(Box::new(backend), CredentialPolicy::FourDigits);
        store.load();

        let err = store.register("1234", "Jane Doe", "1234").unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable(_)));
        assert!(store.is_empty());
        assert!(matches!(
            store.authenticate("1234").unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[test]
    fn failed_write_rolls_back_append_secret() {
        // Seed the backend with one account so the append itself succeeds
        // in memory and only the persist fails.
        let mut seed = memory_store();
        seed.register("1234", "Jane Doe", "1234").unwrap();
        seed.append_secret("1234", entry("first.example", "pw1"))
            .unwrap();
        let payload = serde_json::to_vec_pretty(&seed.accounts).unwrap();

        let backend = FailingBackend {
            payload: Some(payload),
        };
        let mut store = CredentialStore::new(Box::new(backend), CredentialPolicy::FourDigits);
        store.load();
        assert_eq!(store.secrets_of("1234").unwrap().len(), 1);

        let err = store
            .append_secret("1234", entry("second.example", "pw2"))
            .unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable(_)));

        let secrets = store.secrets_of("1234").unwrap();
        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets[0].website, "first.example");
    }

    #[test]
    fn user_ids_are_unique_enough() {
        let a = generate_user_id();
        let b = generate_user_id();
        assert_eq!(a.len(), 16);
        assert_ne!(a, b);
    }
}
