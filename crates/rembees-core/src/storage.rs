use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use crate::CoreError;

/// Record holding the ordered transaction list.
pub const TRANSACTIONS_KEY: &str = "rembees_transactions";
/// Record holding the signed-in user. Absent while logged out.
pub const USER_KEY: &str = "rembees_user";
/// Record holding the active theme.
pub const THEME_KEY: &str = "rembees_theme";

/// String-keyed durable storage, modelled on browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    /// Removing a key that does not exist is not an error.
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// Process-local storage. Clones share the same entries, so a test can keep a
/// handle while a store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|guard| guard.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|guard| guard.contains_key(key))
            .unwrap_or(false)
    }
}

fn poisoned() -> CoreError {
    CoreError::Storage("memory store lock poisoned".into())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        guard.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(handle.get("k").unwrap().as_deref(), Some("v"));
        handle.remove("k").unwrap();
        assert!(!store.contains_key("k"));
    }

    #[test]
    fn removing_missing_key_is_ok() {
        let store = MemoryStore::new();
        store.remove("missing").unwrap();
        assert_eq!(store.get("missing").unwrap(), None);
    }
}
