use ripple_core::{KeyValueStorage, StorageError};
use web_sys as web;

/// `window.localStorage` as a [`KeyValueStorage`].
pub struct BrowserStorage {
    storage: web::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self, StorageError> {
        let storage = web::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
