use std::collections::HashMap;

use keyring::Entry;

use super::{StoreError, TokenStore};

/// Service name entries are filed under in the OS keychain
pub const DEFAULT_SERVICE_NAME: &str = "mfaclient";

/// Token store backed by the OS keychain, one entry per key.
///
/// Entries written through this store are kept and reused, so later reads
/// go through the same credential handle.
pub struct KeyringTokenStore {
    service: String,
    entries: HashMap<String, Entry>,
}

impl KeyringTokenStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            entries: HashMap::new(),
        }
    }

    fn entry_mut(&mut self, key: &str) -> Result<&Entry, StoreError> {
        if !self.entries.contains_key(key) {
            let entry = Entry::new(&self.service, key)?;
            self.entries.insert(key.to_string(), entry);
        }
        self.entries
            .get(key)
            .ok_or_else(|| StoreError::Unavailable(format!("no keychain entry for {}", key)))
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let fresh;
        let entry = match self.entries.get(key) {
            Some(entry) => entry,
            None => {
                fresh = Entry::new(&self.service, key)?;
                &fresh
            }
        };
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entry_mut(key)?.set_password(value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match self.entry_mut(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TOKEN_KEY;

    fn mock_store(service: &str) -> KeyringTokenStore {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        KeyringTokenStore::new(service)
    }

    #[test]
    fn test_set_then_get() {
        let mut store = mock_store("mfaclient-test-set");
        store.set(TOKEN_KEY, "tok-123").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let mut store = mock_store("mfaclient-test-overwrite");
        store.set(TOKEN_KEY, "old").unwrap();
        store.set(TOKEN_KEY, "new").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_remove_clears_value() {
        let mut store = mock_store("mfaclient-test-remove");
        store.set(TOKEN_KEY, "tok").unwrap();
        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_missing_key() {
        let mut store = mock_store("mfaclient-test-missing");
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store.remove(TOKEN_KEY).unwrap();
    }
}
