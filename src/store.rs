//! Durable token storage.
//!
//! The credential is a single opaque string kept under a fixed `token` key
//! in a small JSON document, the desktop analog of the browser's local
//! storage entry. The default location is the platform-local data
//! directory; tests and embedding applications inject their own path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Fixed storage key for the session token.
const TOKEN_KEY: &str = "token";

/// Directory and file under the platform-local data dir.
const STORE_DIR: &str = "ecosystem";
const STORE_FILE: &str = "storage.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no platform data directory available")]
    NoDataDir,
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("store serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed key-value store holding the session token.
///
/// There is no delete operation: the token is only ever overwritten by a
/// later login.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Open the store at its default platform location,
    /// e.g. `~/.local/share/ecosystem/storage.json` on Linux.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::data_local_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self {
            path: dir.join(STORE_DIR).join(STORE_FILE),
        })
    }

    /// Open a store backed by the given file path. The file need not exist.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token.
    ///
    /// A missing file or absent key means no token. An unreadable document
    /// is treated the same, logged rather than surfaced: a mangled store
    /// must not stop the client from logging in again.
    pub fn get_token(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(doc) => doc
                .get(TOKEN_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(e) => {
                log::warn!(
                    "Ignoring corrupt token store at {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Persist the token, overwriting any prior value.
    ///
    /// Other keys in the document are preserved; the file is shared
    /// key-value storage, not token-only.
    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        let mut doc = fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str::<Map<String, Value>>(&raw).ok())
            .unwrap_or_default();
        doc.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&doc)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TokenStore {
        TokenStore::at_path(dir.path().join("storage.json"))
    }

    #[test]
    fn test_missing_file_means_no_token() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set_token("abc123").unwrap();
        assert_eq!(store.get_token(), Some("abc123".to_string()));
    }

    #[test]
    fn test_overwrite_replaces_prior_token() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set_token("first").unwrap();
        store.set_token("second").unwrap();
        assert_eq!(store.get_token(), Some("second".to_string()));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::at_path(dir.path().join("nested/deeper/storage.json"));
        store.set_token("tok").unwrap();
        assert_eq!(store.get_token(), Some("tok".to_string()));
    }

    #[test]
    fn test_corrupt_document_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), b"{not json").unwrap();
        assert_eq!(store.get_token(), None);

        // A write recovers the store.
        store.set_token("fresh").unwrap();
        assert_eq!(store.get_token(), Some("fresh".to_string()));
    }

    #[test]
    fn test_other_keys_preserved() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), br#"{"theme":"dark"}"#).unwrap();
        store.set_token("tok").unwrap();

        let doc: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(doc["theme"], "dark");
        assert_eq!(doc["token"], "tok");
    }

    #[test]
    fn test_non_string_token_value_ignored() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), br#"{"token":42}"#).unwrap();
        assert_eq!(store.get_token(), None);
    }
}
