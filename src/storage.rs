//! Persistence of favorites and statistics through a key-value port.
//!
//! The roaster only talks to [`KeyValueStore`]. In the browser that is
//! [`LocalStore`] (`window.localStorage`); everywhere else, and whenever local
//! storage is unavailable, it is [`MemoryStore`]. Values are JSON strings.

use std::collections::HashMap;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::favorites::Favorites;
use crate::stats::Statistics;

pub const FAVORITES_KEY: &str = "favorites";
pub const STATS_KEY: &str = "stats";

pub trait KeyValueStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

/// Process-local store; lost with the page.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw entry, e.g. to simulate what a previous session left behind.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// `window.localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let storage = window.local_storage()?.ok_or(Error::NoStorage)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value)?;
        Ok(())
    }
}

/// Storage keys, optionally namespaced so several widgets can share an origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    pub favorites: String,
    pub stats: String,
}

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            favorites: format!("{prefix}{FAVORITES_KEY}"),
            stats: format!("{prefix}{STATS_KEY}"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix("")
    }
}

/// Hydrates and writes back the two persisted entries.
pub struct Persistence<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Missing or malformed entries fall back to their defaults.
    pub fn hydrate(&self) -> (Favorites, Statistics) {
        let favorites = load_json::<Favorites>(&self.store, &self.keys.favorites).unwrap_or_default();
        let stats = load_object::<Statistics>(&self.store, &self.keys.stats)
            .unwrap_or_default()
            .normalized();
        trace!(favorites = favorites.len(), ?stats, "hydrated");
        (favorites, stats)
    }

    /// Writes both entries. Both writes are attempted even if the first fails.
    pub fn persist(&mut self, favorites: &Favorites, stats: &Statistics) -> Result<()> {
        let favorites = save_json(&mut self.store, &self.keys.favorites, favorites);
        let stats = save_json(&mut self.store, &self.keys.stats, stats);
        favorites.and(stats)
    }
}

fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.load(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(key, error = %err, "ignoring malformed stored value");
            None
        }
    }
}

// serde's derived struct visitor also accepts sequences, so `[1,2,3]` would
// otherwise load as a positional record.
fn load_object<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let value = load_json::<serde_json::Value>(store, key)?;
    if !value.is_object() {
        debug!(key, "ignoring stored value that is not a JSON object");
        return None;
    }
    match serde_json::from_value(value) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(key, error = %err, "ignoring malformed stored value");
            None
        }
    }
}

fn save_json<T: Serialize>(store: &mut impl KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.save(key, &raw)
}
