//! Durable session storage: the auth token and the signed-in user's profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build persists to `window.localStorage` so a session survives
//! reloads and is shared across tabs. Native builds and tests use an
//! in-memory map behind the same trait.
//!
//! ERROR HANDLING
//! ==============
//! Storage is best-effort. Quota/security failures on write are dropped and a
//! corrupt stored profile reads as absent instead of failing the caller.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::net::types::UserProfile;

pub const TOKEN_KEY: &str = "hanzi_token";
pub const USER_KEY: &str = "hanzi_user";

/// Minimal string key/value store with `localStorage` semantics.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`; a no-op outside the browser build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Process-local storage. Clones share the same map, like two handles on
/// one `localStorage`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Token + profile persistence over any [`KeyValueStorage`].
#[derive(Clone, Debug, Default)]
pub struct TokenStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> TokenStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored bearer token, if any.
    pub fn read(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// Persist whichever halves are present.
    ///
    /// An empty or missing token leaves the stored token untouched; a missing
    /// user leaves the stored profile untouched.
    pub fn write(&self, token: Option<&str>, user: Option<&UserProfile>) {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.storage.set(TOKEN_KEY, token);
        }
        if let Some(user) = user {
            match serde_json::to_string(user) {
                Ok(raw) => self.storage.set(USER_KEY, &raw),
                Err(e) => log::warn!("user profile not persisted: {e}"),
            }
        }
    }

    /// Remove both token and profile.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }

    /// Stored user profile; malformed JSON reads as `None`.
    pub fn read_user(&self) -> Option<UserProfile> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("ignoring malformed stored user profile: {e}");
                None
            }
        }
    }
}
