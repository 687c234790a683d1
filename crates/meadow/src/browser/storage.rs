//! `localStorage` binding for the theme preference.
//!
//! In WASM this reads and writes the browser's per-origin `localStorage`.
//! Elsewhere (tests, native builds) it keeps values in memory.
//!
//! # Example
//!
//! ```
//! use meadow::browser::storage::LocalStorage;
//!
//! let storage = LocalStorage::new();
//! storage.set("theme", "light").unwrap();
//! assert_eq!(storage.get("theme").as_deref(), Some("light"));
//! ```

use meadow_core::PreferenceStore;
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
use std::{cell::RefCell, collections::HashMap};

/// Storage error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Storage is not available (e.g. disabled by privacy settings)
    #[error("storage not available")]
    NotAvailable,
    /// Storage quota exceeded
    #[error("storage quota exceeded")]
    QuotaExceeded,
    /// Access denied
    #[error("storage access denied")]
    AccessDenied,
}

/// Durable per-origin key-value store.
#[derive(Debug, Default)]
pub struct LocalStorage {
    #[cfg(not(target_arch = "wasm32"))]
    memory: RefCell<HashMap<String, String>>,
}

impl LocalStorage {
    /// Create a handle. The browser store is looked up on each access.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value from storage.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::browser_storage()?.get_item(key).ok()?
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.memory.borrow().get(key).cloned()
        }
    }

    /// Set a value in storage.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::browser_storage()
                .ok_or(StorageError::NotAvailable)?
                .set_item(key, value)
                .map_err(|_| StorageError::QuotaExceeded)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.memory
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    /// Remove a value from storage.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::browser_storage()
                .ok_or(StorageError::NotAvailable)?
                .remove_item(key)
                .map_err(|_| StorageError::AccessDenied)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.memory.borrow_mut().remove(key);
            Ok(())
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn browser_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl PreferenceStore for LocalStorage {
    type Error = StorageError;

    fn load(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_core::{ResolvedTheme, ThemeChoice, ThemeManager};
    use std::rc::Rc;

    #[test]
    fn test_storage_set_get() {
        let storage = LocalStorage::new();
        storage.set("test_key", "test_value").unwrap();
        assert_eq!(storage.get("test_key"), Some("test_value".to_string()));
    }

    #[test]
    fn test_storage_get_nonexistent() {
        let storage = LocalStorage::new();
        assert_eq!(storage.get("nonexistent"), None);
    }

    #[test]
    fn test_storage_overwrite() {
        let storage = LocalStorage::new();
        storage.set("theme", "dark").unwrap();
        storage.set("theme", "light").unwrap();
        assert_eq!(storage.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_storage_remove() {
        let storage = LocalStorage::new();
        storage.set("to_remove", "value").unwrap();
        storage.remove("to_remove").unwrap();
        assert!(storage.get("to_remove").is_none());
    }

    #[test]
    fn test_storage_as_preference_store() {
        let storage = Rc::new(LocalStorage::new());
        let mut manager = ThemeManager::new(Rc::clone(&storage), "theme", ThemeChoice::Dark);
        manager.select(ThemeChoice::Light, ResolvedTheme::Dark);
        assert_eq!(storage.load("theme").as_deref(), Some("light"));

        let reloaded = ThemeManager::new(Rc::clone(&storage), "theme", ThemeChoice::Dark);
        assert_eq!(reloaded.choice(), ThemeChoice::Light);
    }

    #[test]
    fn test_storage_save_reports_storage_error() {
        fn save_with<S>(store: &S) -> Result<(), StorageError>
        where
            S: PreferenceStore<Error = StorageError>,
        {
            store.save("theme", "system")
        }
        let storage = LocalStorage::new();
        assert_eq!(save_with(&storage), Ok(()));
        assert_eq!(storage.load("theme").as_deref(), Some("system"));
    }

    #[test]
    fn test_storage_error_display() {
        assert_eq!(StorageError::NotAvailable.to_string(), "storage not available");
        assert_eq!(StorageError::QuotaExceeded.to_string(), "storage quota exceeded");
        assert_eq!(StorageError::AccessDenied.to_string(), "storage access denied");
    }
}
