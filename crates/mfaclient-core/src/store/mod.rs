//! Durable key-value storage for the session token.
//!
//! This module provides:
//! - `TokenStore`: the get/set/remove capability the session manager uses
//! - `FileTokenStore`: JSON file in the cache directory
//! - `KeyringTokenStore`: OS-level keychain via keyring
//! - `MemoryTokenStore`: in-process map, gone when the process exits
//!
//! The session token lives under the fixed key [`TOKEN_KEY`].

pub mod file;
pub mod keychain;
pub mod memory;

use thiserror::Error;

pub use file::FileTokenStore;
pub use keychain::KeyringTokenStore;
pub use memory::MemoryTokenStore;

/// Key the session token is stored under
pub const TOKEN_KEY: &str = "token";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage scoped to this application.
///
/// Removing a key that is not present succeeds.
pub trait TokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: TokenStore + ?Sized> TokenStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
