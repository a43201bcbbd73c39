//! Persistence port for session state.
//! The credential and the last-selected account type are stored as plain
//! strings under fixed keys so the backing store can be swapped per target
//! environment (in-memory, file, secure keystore).

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_lot::RwLock;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the last-selected account type tag.
pub const ACCOUNT_TYPE_KEY: &str = "userType";

pub trait TokenStore: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
    fn clear(&self, key: &str) -> Result<()>;
}

/// Volatile store for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self { Self::default() }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// One file per key under a state directory; survives process restarts
/// until cleared by logout.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, key: &str) -> Option<String> {
        let text = fs::read_to_string(self.path_for(key)).ok()?;
        let trimmed = text.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating state dir {}", self.dir.display()))?;
        fs::write(self.path_for(key), value)
            .with_context(|| format!("writing state key '{}'", key))
    }

    fn clear(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("clearing state key '{}'", key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load(TOKEN_KEY), None);
        store.save(TOKEN_KEY, "tok-1").unwrap();
        assert_eq!(store.load(TOKEN_KEY).as_deref(), Some("tok-1"));
        store.clear(TOKEN_KEY).unwrap();
        assert_eq!(store.load(TOKEN_KEY), None);
    }

    #[test]
    fn file_store_survives_reopen_and_tolerates_missing_keys() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("state");

        let store = FileTokenStore::new(&dir);
        // Clearing a key that was never written is not an error.
        store.clear(TOKEN_KEY).unwrap();
        store.save(TOKEN_KEY, "tok-9").unwrap();
        store.save(ACCOUNT_TYPE_KEY, "Charity").unwrap();

        let reopened = FileTokenStore::new(&dir);
        assert_eq!(reopened.load(TOKEN_KEY).as_deref(), Some("tok-9"));
        assert_eq!(reopened.load(ACCOUNT_TYPE_KEY).as_deref(), Some("Charity"));

        reopened.clear(TOKEN_KEY).unwrap();
        assert_eq!(store.load(TOKEN_KEY), None);
        // The account type key is untouched by clearing the token.
        assert_eq!(store.load(ACCOUNT_TYPE_KEY).as_deref(), Some("Charity"));
    }
}
