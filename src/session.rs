//! Session store — the single shared state of the client.
//!
//! DESIGN
//! ======
//! `SessionStore` is an injectable handle (cheap to clone) over
//! `Arc<RwLock<Session>>`; views read snapshots and dispatch intents, they
//! never mutate the session directly. No network calls originate here —
//! flows in `services` drive the store after gateway responses.
//!
//! INVARIANT
//! =========
//! A non-null token implies a non-null user populated from a successful
//! authentication response. The API enforces this structurally: `login`
//! is the only way to set a token and it requires the profile; restoring
//! a persisted token goes through `services::profile::restore_session`,
//! which clears the credential when the profile fetch fails.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::api::types::{UserDetailsUpdate, UserProfile};
use crate::storage::{MemoryTokenStore, StorageError, TokenStore};

/// Client-side record of the authenticated identity and its credential.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

/// Shared, persistent session state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
    storage: Arc<dyn TokenStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn TokenStore>) -> Self {
        Self { inner: Arc::new(RwLock::new(Session::default())), storage }
    }

    /// Store backed by process memory only. Default for tests and shells
    /// without durable storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Current session state, cloned.
    pub async fn snapshot(&self) -> Session {
        self.inner.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.inner.read().await.user.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.token.clone()
    }

    /// Token in durable storage, independent of in-memory state. Used by
    /// session restore at startup.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be read.
    pub fn persisted_token(&self) -> Result<Option<String>, StorageError> {
        self.storage.load()
    }

    /// Establish a session from a successful authentication response.
    /// Persists the token before exposing the new state.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the token cannot be persisted; the
    /// in-memory session is left unchanged in that case.
    pub async fn login(&self, user: UserProfile, token: String) -> Result<(), StorageError> {
        self.storage.save(&token)?;
        let mut session = self.inner.write().await;
        info!(username = %user.username, "session established");
        session.user = Some(user);
        session.token = Some(token);
        Ok(())
    }

    /// Clear state and durable storage. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the persisted credential cannot be
    /// removed; the in-memory session is cleared regardless.
    pub async fn logout(&self) -> Result<(), StorageError> {
        {
            let mut session = self.inner.write().await;
            if session.user.is_some() || session.token.is_some() {
                info!("session cleared");
            }
            *session = Session::default();
        }
        self.storage.clear()
    }

    /// Merge edited fields into the cached profile. No-op when logged out.
    pub async fn update_profile(&self, update: &UserDetailsUpdate) {
        let mut session = self.inner.write().await;
        let Some(user) = session.user.as_mut() else {
            return;
        };
        if let Some(full_name) = &update.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(username) = &update.username {
            user.username = username.clone();
        }
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        if let Some(contact) = &update.contact {
            user.contact = contact.clone();
        }
    }

    /// Replace the cached profile wholesale after a fresh fetch.
    pub async fn replace_profile(&self, user: UserProfile) {
        let mut session = self.inner.write().await;
        if session.token.is_some() {
            session.user = Some(user);
        }
    }

    pub async fn set_profile_picture(&self, url: String) {
        let mut session = self.inner.write().await;
        if let Some(user) = session.user.as_mut() {
            user.profile_picture_url = Some(url);
        }
    }

    /// The account no longer exists server-side; equivalent to logout.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the persisted credential cannot be
    /// removed.
    pub async fn account_deleted(&self) -> Result<(), StorageError> {
        self.logout().await
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
