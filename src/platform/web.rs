//! LocalStorage access for the browser build

use crate::persistence::ScoreStore;

/// [`ScoreStore`] over `window.localStorage`. Missing storage (private
/// browsing, sandboxed iframes) behaves like an empty, write-only store.
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("LocalStorage rejected write of {}", key);
                }
            }
            None => log::warn!("LocalStorage unavailable, {} not saved", key),
        }
    }
}
