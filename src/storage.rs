//! Persisted session store over browser localStorage.
//!
//! DESIGN
//! ======
//! The store is a small key-value abstraction injected into the HTTP client
//! and the session context, so native tests can substitute `MemoryStore` for
//! the real storage medium. All values are stored as text; structured values
//! round-trip through JSON. A value that fails to decode is evicted and
//! reported as absent (self-healing read) — callers never see a decode error.
//!
//! Expiry is not enforced here; an expired access token is only discovered
//! through a 401 response.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage keys for the persisted session and preferences.
///
/// Credentials live under one unified key set fed by a single
/// [`crate::state::session::Credentials`] entity.
pub mod keys {
    /// Short-lived bearer credential attached to outbound requests.
    pub const ACCESS_TOKEN: &str = "tutorlink_access_token";
    /// Long-lived credential exchanged for a new access token on expiry.
    pub const REFRESH_TOKEN: &str = "tutorlink_refresh_token";
    /// Role string of the signed-in user.
    pub const ROLE: &str = "tutorlink_role";
    /// JSON-encoded profile of the signed-in user.
    pub const PROFILE: &str = "tutorlink_profile";
    /// Light/dark preference. Unrelated to auth and survives logout.
    pub const THEME: &str = "tutorlink_theme";
}

/// Keys removed by [`clear_session`]. [`keys::THEME`] is deliberately absent.
const SESSION_KEYS: [&str; 4] = [
    keys::ACCESS_TOKEN,
    keys::REFRESH_TOKEN,
    keys::ROLE,
    keys::PROFILE,
];

/// Key-value wrapper over a text storage medium.
///
/// Implementations are shared across the view tree and the network layer,
/// so they must be usable behind `Arc`.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    /// Remove every key this application owns, preferences included.
    fn clear(&self);
}

/// Remove all credential and profile keys, leaving preferences intact.
pub fn clear_session(store: &dyn SessionStore) {
    for key in SESSION_KEYS {
        store.remove(key);
    }
}

/// Read a JSON-encoded value.
///
/// An entry that fails to parse is evicted and `None` is returned; a second
/// read of the same key is also `None`, without error.
pub fn get_json<T: DeserializeOwned>(store: &dyn SessionStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(_) => {
            store.remove(key);
            None
        }
    }
}

/// Write a value as JSON text. Serialization of plain data types is
/// infallible in practice; a failure leaves the previous entry in place.
pub fn set_json<T: Serialize>(store: &dyn SessionStore, key: &str, value: &T) {
    if let Ok(raw) = serde_json::to_string(value) {
        store.set(key, &raw);
    }
}

/// In-memory store for tests and server-side rendering.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.values.lock().remove(key);
    }

    fn clear(&self) {
        self.values.lock().clear();
    }
}

/// Browser localStorage. Reads and writes degrade to no-ops when the storage
/// area is unavailable (private browsing, storage disabled).
#[cfg(feature = "hydrate")]
#[derive(Debug, Default)]
pub struct LocalStore;

#[cfg(feature = "hydrate")]
impl LocalStore {
    fn backing() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(feature = "hydrate")]
impl SessionStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::backing()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::backing() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::backing() {
            let _ = storage.remove_item(key);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::backing() {
            for key in SESSION_KEYS {
                let _ = storage.remove_item(key);
            }
            let _ = storage.remove_item(keys::THEME);
        }
    }
}
