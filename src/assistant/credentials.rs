#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

pub const API_KEY_STORAGE_KEY: &str = "lyra_api_key";

/// Minimal string key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`; behaves as an empty store when storage is unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(s) = Self::storage() {
            let _ = s.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(s) = Self::storage() {
            let _ = s.remove_item(key);
        }
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    /// No key stored. A normal state, not an error.
    Unconfigured,
    Configured(String),
}

#[derive(Debug, Default)]
pub struct CredentialStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Credential {
        match self.store.get(API_KEY_STORAGE_KEY) {
            Some(k) if !k.trim().is_empty() => Credential::Configured(k.trim().to_string()),
            _ => Credential::Unconfigured,
        }
    }

    /// Stores a trimmed key; a blank key clears instead.
    pub fn set(&self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            self.clear();
        } else {
            self.store.set(API_KEY_STORAGE_KEY, key);
        }
    }

    pub fn clear(&self) {
        self.store.remove(API_KEY_STORAGE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unconfigured() {
        let creds = CredentialStore::new(MemoryStore::default());
        assert_eq!(creds.get(), Credential::Unconfigured);
    }

    #[test]
    fn set_trims_and_clear_removes() {
        let creds = CredentialStore::new(MemoryStore::default());
        creds.set("  sk-test  ");
        assert_eq!(creds.get(), Credential::Configured("sk-test".into()));
        creds.clear();
        assert_eq!(creds.get(), Credential::Unconfigured);
    }

    #[test]
    fn blank_key_clears() {
        let creds = CredentialStore::new(MemoryStore::default());
        creds.set("sk-test");
        creds.set("   ");
        assert_eq!(creds.get(), Credential::Unconfigured);
    }

    #[test]
    fn whitespace_only_stored_value_reads_as_unconfigured() {
        let store = MemoryStore::default();
        store.set(API_KEY_STORAGE_KEY, "  ");
        assert_eq!(CredentialStore::new(store).get(), Credential::Unconfigured);
    }
}
