//! Key/value persistence for session credentials.
//!
//! Three keys are ever written: `access_token`, `refresh_token`, `is_staff`.
//! Stores have no expiry timer; values live until cleared.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

// =============================================================================
// KEYS & ERRORS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    AccessToken,
    RefreshToken,
    IsStaff,
}

impl StorageKey {
    pub const ALL: [Self; 3] = [Self::AccessToken, Self::RefreshToken, Self::IsStaff];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
            Self::IsStaff => "is_staff",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session file io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("browser storage unavailable: {0}")]
    Browser(String),
}

/// Persistence seam for session credentials.
///
/// Implementations must tolerate concurrent callers; there is no cross-process
/// coordination, the last write wins.
pub trait SessionStore: Send + Sync {
    /// Read a stored value. Unreadable storage reads as absent.
    fn get(&self, key: StorageKey) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage rejects the write.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage rejects the removal.
    fn clear(&self, key: StorageKey) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local store. Used by tests and short-lived embeddings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value.to_owned());
        Ok(())
    }

    fn clear(&self, key: StorageKey) -> Result<(), StoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// JSON-file store used by the CLI. The whole map is rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the session file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values: RwLock::new(values) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let rendered = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, rendered)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key.as_str())
            .cloned()
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.as_str().to_owned(), value.to_owned());
        self.flush(&values)
    }

    fn clear(&self, key: StorageKey) -> Result<(), StoreError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        if values.remove(key.as_str()).is_none() {
            return Ok(());
        }
        self.flush(&values)
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.localStorage`-backed store for WASM shells.
#[cfg(feature = "browser")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(feature = "browser")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Browser("no window".to_owned()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Browser(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Browser("localStorage disabled".to_owned()))
    }
}

#[cfg(feature = "browser")]
impl SessionStore for LocalStorageStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        Self::storage().ok()?.get_item(key.as_str()).ok().flatten()
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key.as_str(), value)
            .map_err(|e| StoreError::Browser(format!("{e:?}")))
    }

    fn clear(&self, key: StorageKey) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key.as_str())
            .map_err(|e| StoreError::Browser(format!("{e:?}")))
    }
}
