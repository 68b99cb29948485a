//! Token store over an injected key-value backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build backs this with `localStorage`; tests and native callers
//! use [`MemoryStorage`]. The store is the only owner of its two keys.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_IDENTITY_KEY, DEFAULT_TOKEN_KEY};
use crate::token::Claims;

/// Error returned by [`KeyValueStorage`] writes and [`TokenStore`] setters.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store cannot be reached (private mode, quota, no window).
    #[error("storage unavailable")]
    Unavailable,
    /// The identity snapshot could not be serialized.
    #[error("failed to encode identity snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Simple persistent string storage scoped to one client.
pub trait KeyValueStorage {
    /// Read `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory [`KeyValueStorage`], optionally simulating an unavailable backend.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    available: Cell<bool>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            available: Cell::new(true),
        }
    }
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose every call fails with [`StorageError::Unavailable`].
    #[must_use]
    pub fn unavailable() -> Self {
        let storage = Self::default();
        storage.available.set(false);
        storage
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Number of stored entries, regardless of availability.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.available.get() {
            Ok(())
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Display copy of selected claims, cached next to the token at login.
///
/// Serialized with the claim names (`sub`, `user_id`, `iat`, `exp`) so a raw
/// claims object stored under the identity key reads back as a snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl Identity {
    #[must_use]
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            username: claims.subject().map(str::to_owned),
            user_id: claims.user_id(),
            issued_at: claims.issued_at(),
            expires_at: claims.exp,
        }
    }
}

/// Durable home of the bearer token and its identity snapshot.
#[derive(Debug)]
pub struct TokenStore<S> {
    storage: S,
    token_key: String,
    identity_key: String,
}

impl<S: KeyValueStorage> TokenStore<S> {
    /// Store using the default `accessToken` / `loggedInUser` keys.
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, DEFAULT_TOKEN_KEY, DEFAULT_IDENTITY_KEY)
    }

    pub fn with_keys(storage: S, token_key: impl Into<String>, identity_key: impl Into<String>) -> Self {
        Self {
            storage,
            token_key: token_key.into(),
            identity_key: identity_key.into(),
        }
    }

    /// Persist `token`, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the write fails.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(&self.token_key, token)
    }

    /// Current token; an unreadable backend reads as no token.
    pub fn token(&self) -> Option<String> {
        match self.storage.get(&self.token_key) {
            Ok(token) => token,
            Err(e) => {
                log::warn!("session: cannot read token: {e}");
                None
            }
        }
    }

    /// Cache the identity snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if encoding or the write fails.
    pub fn set_identity(&self, identity: &Identity) -> Result<(), StorageError> {
        let raw = serde_json::to_string(identity)?;
        self.storage.set(&self.identity_key, &raw)
    }

    /// Cached identity snapshot; unreadable or corrupt entries read as absent.
    pub fn identity(&self) -> Option<Identity> {
        let raw = match self.storage.get(&self.identity_key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("session: cannot read identity: {e}");
                return None;
            }
        };
        serde_json::from_str(&raw).ok()
    }

    /// Remove the token and the identity snapshot. Safe to repeat.
    pub fn clear(&self) {
        for key in [&self.token_key, &self.identity_key] {
            if let Err(e) = self.storage.remove(key) {
                log::warn!("session: cannot remove {key}: {e}");
            }
        }
    }
}
