//! Persistent API-key storage.
//!
//! The key the user pastes in is an opaque string; the only validation is
//! non-emptiness after trimming.  It is persisted verbatim in a fixed file
//! under the config directory and removed again by an explicit clear, which
//! mirrors how the browser version of this tool kept the key under a fixed
//! `localStorage` entry.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use super::AppPaths;

/// Errors from API-key persistence.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The supplied key was empty (or whitespace only).
    #[error("API key must not be empty")]
    EmptyKey,

    /// Reading or writing the key file failed.
    #[error("API key storage failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads, saves and clears the stored Gemini API key.
#[derive(Debug, Clone)]
pub struct ApiKeyStore {
    path: PathBuf,
}

impl ApiKeyStore {
    /// Store backed by the platform-appropriate config directory.
    pub fn new() -> Self {
        Self {
            path: AppPaths::new().api_key_file,
        }
    }

    /// Store backed by an explicit path (useful for tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Return the stored key, or `None` when no key has been saved yet.
    ///
    /// An existing but empty file is treated the same as a missing one.
    pub fn load(&self) -> Result<Option<String>, CredentialError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let key = fs::read_to_string(&self.path)?;
        let key = key.trim();
        if key.is_empty() {
            return Ok(None);
        }
        Ok(Some(key.to_string()))
    }

    /// Persist `key`, creating parent directories as needed.
    pub fn save(&self, key: &str) -> Result<(), CredentialError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CredentialError::EmptyKey);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, key)?;
        Ok(())
    }

    /// Remove the stored key.  Clearing a store that holds no key is a no-op.
    pub fn clear(&self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for ApiKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> ApiKeyStore {
        ApiKeyStore::at(dir.path().join("api-key"))
    }

    #[test]
    fn load_without_saved_key_returns_none() {
        let dir = tempdir().expect("temp dir");
        let store = store_in(&dir);
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().expect("temp dir");
        let store = store_in(&dir);

        store.save("AIzaSy-test-key").expect("save");
        assert_eq!(
            store.load().expect("load").as_deref(),
            Some("AIzaSy-test-key")
        );
    }

    #[test]
    fn save_trims_surrounding_whitespace() {
        let dir = tempdir().expect("temp dir");
        let store = store_in(&dir);

        store.save("  AIzaSy-test-key\n").expect("save");
        assert_eq!(
            store.load().expect("load").as_deref(),
            Some("AIzaSy-test-key")
        );
    }

    #[test]
    fn empty_key_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let store = store_in(&dir);

        assert!(matches!(store.save(""), Err(CredentialError::EmptyKey)));
        assert!(matches!(
            store.save("   \n"),
            Err(CredentialError::EmptyKey)
        ));
    }

    #[test]
    fn clear_removes_the_key() {
        let dir = tempdir().expect("temp dir");
        let store = store_in(&dir);

        store.save("AIzaSy-test-key").expect("save");
        store.clear().expect("clear");
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn clear_without_saved_key_is_ok() {
        let dir = tempdir().expect("temp dir");
        let store = store_in(&dir);
        store.clear().expect("clear should be a no-op");
    }
}
