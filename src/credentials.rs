//! "Remember me" credential cache and last-used account.
//!
//! Both files are plain JSON. The password is stored as typed, so the cache
//! is only as private as the data directory it lives in.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Cached login for the "remember me" checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedLogin {
    pub account: String,
    pub password: String,
    pub remember: bool,
}

/// Account used by the last successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastAccount {
    pub account: String,
}

/// Values to pre-fill the login form with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefill {
    pub account: String,
    pub password: String,
    pub remember: bool,
}

/// File-backed store for the two login helper files.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    remember_path: PathBuf,
    last_account_path: PathBuf,
}

impl CredentialStore {
    pub fn new(remember_path: impl Into<PathBuf>, last_account_path: impl Into<PathBuf>) -> Self {
        Self {
            remember_path: remember_path.into(),
            last_account_path: last_account_path.into(),
        }
    }

    /// Remembered credentials, if any. Unreadable files count as absent.
    pub fn load_remembered(&self) -> Option<RememberedLogin> {
        read_json::<RememberedLogin>(&self.remember_path).filter(|r| r.remember)
    }

    /// Write the credential cache.
    pub fn remember(&self, account: &str, password: &str) -> Result<()> {
        let entry = RememberedLogin {
            account: account.to_string(),
            password: password.to_string(),
            remember: true,
        };
        write_json(&self.remember_path, &entry)
    }

    /// Delete the credential cache. A missing file is not an error.
    pub fn forget(&self) -> Result<()> {
        match std::fs::remove_file(&self.remember_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load_last_account(&self) -> Option<String> {
        read_json::<LastAccount>(&self.last_account_path).map(|l| l.account)
    }

    pub fn save_last_account(&self, account: &str) -> Result<()> {
        let entry = LastAccount {
            account: account.to_string(),
        };
        write_json(&self.last_account_path, &entry)
    }

    /// Remembered credentials first, else the last account with an empty password.
    pub fn prefill(&self) -> Prefill {
        if let Some(remembered) = self.load_remembered() {
            return Prefill {
                account: remembered.account,
                password: remembered.password,
                remember: true,
            };
        }

        Prefill {
            account: self.load_last_account().unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Persist the outcome of a successful login.
    pub fn record_login(&self, account: &str, password: &str, remember: bool) -> Result<()> {
        self.save_last_account(account)?;
        if remember {
            self.remember(account, password)
        } else {
            self.forget()
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> CredentialStore {
        CredentialStore::new(dir.join("remember.json"), dir.join("last_account.json"))
    }

    #[test]
    fn test_remember_and_forget() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store.remember("alice", "pw").unwrap();
        let remembered = store.load_remembered().unwrap();
        assert_eq!(remembered.account, "alice");
        assert_eq!(remembered.password, "pw");

        store.forget().unwrap();
        assert!(!dir.path().join("remember.json").exists());
        assert!(store.load_remembered().is_none());

        // Forgetting twice is fine
        store.forget().unwrap();
    }

    #[test]
    fn test_prefill_falls_back_to_last_account() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        assert_eq!(store.prefill(), Prefill::default());

        store.record_login("bob", "pw", false).unwrap();
        let prefill = store.prefill();
        assert_eq!(prefill.account, "bob");
        assert!(prefill.password.is_empty());
        assert!(!prefill.remember);

        store.record_login("carol", "secret", true).unwrap();
        let prefill = store.prefill();
        assert_eq!(prefill.account, "carol");
        assert_eq!(prefill.password, "secret");
        assert!(prefill.remember);
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        std::fs::write(dir.path().join("remember.json"), "{not json").unwrap();

        assert!(store.load_remembered().is_none());
    }

    #[test]
    fn test_unchecked_flag_is_not_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let entry = RememberedLogin {
            account: "dan".to_string(),
            password: "pw".to_string(),
            remember: false,
        };
        std::fs::write(dir.path().join("remember.json"), serde_json::to_string(&entry).unwrap()).unwrap();

        assert!(store.load_remembered().is_none());
    }
}
