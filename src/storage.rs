//! Durable token persistence.
//!
//! The browser build of the app keeps the credential under the
//! `leelame-app-token` key in local storage. Native shells persist the
//! same single-record shape to a file; tests use the in-memory store.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Storage key for the session credential, shared with the browser build.
pub const TOKEN_KEY: &str = "leelame-app-token";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("token storage io failed: {0}")]
    Io(String),
    #[error("token record malformed: {0}")]
    Malformed(String),
}

/// Durable key-value slot for the session token.
///
/// Implementations must be safe to share across views; the session store
/// writes on every login/logout.
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, `None` when no credential is stored.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Persist the token, replacing any previous credential.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the persisted credential. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<(), StorageError>;
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Process-local store with no durability. Default for tests and shells
/// that manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Record shape on disk. Mirrors the browser's local-storage entry so a
/// shell can migrate between the two without re-authenticating.
#[derive(Debug, Serialize, Deserialize)]
struct TokenRecord {
    #[serde(rename = "leelame-app-token")]
    token: String,
}

/// File-backed store for native shells.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };
        let record: TokenRecord =
            serde_json::from_str(&raw).map_err(|e| StorageError::Malformed(e.to_string()))?;
        Ok(Some(record.token))
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let record = TokenRecord { token: token.to_string() };
        let raw = serde_json::to_string(&record).map_err(|e| StorageError::Malformed(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| StorageError::Io(e.to_string()))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
