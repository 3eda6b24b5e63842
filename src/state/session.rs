//! Typed session view over a [`SessionStore`].
//!
//! DESIGN
//! ======
//! Every write publishes a fresh [`SessionSnapshot`] on a `watch` channel.
//! Navbars and shells subscribe to it instead of reloading the application
//! after login or logout.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::store::{MemoryStore, SessionStore, StorageKey, StoreError};

/// Derived login state observed by route gates and subscribers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub logged_in: bool,
    pub is_staff: bool,
}

/// Shared handle to the persisted session. Cheap to clone.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
    changes: Arc<watch::Sender<SessionSnapshot>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("snapshot", &self.snapshot()).finish_non_exhaustive()
    }
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let initial = snapshot_of(store.as_ref());
        let (changes, _) = watch::channel(initial);
        Self { store, changes: Arc::new(changes) }
    }

    /// Session backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Stored access token. An empty string counts as absent.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.store
            .get(StorageKey::AccessToken)
            .filter(|token| !token.is_empty())
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.store
            .get(StorageKey::RefreshToken)
            .filter(|token| !token.is_empty())
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    /// Staff flag. Only exactly `"true"` counts, and only while a token is present.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        self.is_logged_in() && self.store.get(StorageKey::IsStaff).as_deref() == Some("true")
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        snapshot_of(self.store.as_ref())
    }

    /// Receiver that observes every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.changes.subscribe()
    }

    /// Persist a freshly issued token pair and its staff flag.
    ///
    /// Three independent writes; a failure part-way leaves the earlier writes
    /// in place.
    ///
    /// # Errors
    ///
    /// Returns the first store write failure.
    pub fn sign_in(&self, access: &str, refresh: &str, is_staff: bool) -> Result<(), StoreError> {
        let result = self
            .store
            .set(StorageKey::AccessToken, access)
            .and_then(|()| self.store.set(StorageKey::RefreshToken, refresh))
            .and_then(|()| self.store.set(StorageKey::IsStaff, staff_flag(is_staff)));
        self.publish();
        result
    }

    /// Replace the access token after an explicit refresh.
    ///
    /// # Errors
    ///
    /// Returns the first store write failure.
    pub fn replace_access_token(&self, access: &str, is_staff: bool) -> Result<(), StoreError> {
        let result = self
            .store
            .set(StorageKey::AccessToken, access)
            .and_then(|()| self.store.set(StorageKey::IsStaff, staff_flag(is_staff)));
        self.publish();
        result
    }

    /// Clear every stored credential. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns the first store removal failure; the remaining keys are still
    /// attempted.
    pub fn sign_out(&self) -> Result<(), StoreError> {
        let mut first_error = None;
        for key in StorageKey::ALL {
            if let Err(e) = self.store.clear(key) {
                first_error.get_or_insert(e);
            }
        }
        self.publish();
        first_error.map_or(Ok(()), Err)
    }

    fn publish(&self) {
        let next = self.snapshot();
        self.changes.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

fn snapshot_of(store: &dyn SessionStore) -> SessionSnapshot {
    let logged_in = store
        .get(StorageKey::AccessToken)
        .is_some_and(|token| !token.is_empty());
    let is_staff = logged_in && store.get(StorageKey::IsStaff).as_deref() == Some("true");
    SessionSnapshot { logged_in, is_staff }
}

fn staff_flag(is_staff: bool) -> &'static str {
    if is_staff { "true" } else { "false" }
}
