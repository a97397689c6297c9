//! Storage abstraction layer for the EMA portal.
//!
//! Provides the [`Store`] trait, a string key/value scope, and the
//! [`ScopedStorage`] pair that models the two places a browser keeps
//! credentials: a **persistent** scope that survives restarts and a
//! **session** scope that dies with the browser session.
//!
//! # Feature Flags
//!
//! - `file` (default): [`FileStore`], a JSON-file backed persistent scope

mod error;
#[cfg(feature = "file")]
mod file;
mod memory;

pub use error::StorageError;
#[cfg(feature = "file")]
pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;
use std::sync::Arc;

/// Key under which the auth token is stored.
pub const TOKEN_KEY: &str = "token";

/// Key under which the JSON-serialized user is stored.
pub const USER_KEY: &str = "user";

/// Which of the two storage scopes to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// Survives process (browser) restarts.
    Persistent,
    /// Cleared when the session ends.
    Session,
}

impl StorageScope {
    /// Maps the "remember me" choice onto a scope.
    pub fn from_remember(remember: bool) -> Self {
        if remember {
            StorageScope::Persistent
        } else {
            StorageScope::Session
        }
    }

    /// Returns the opposite scope.
    pub fn other(self) -> Self {
        match self {
            StorageScope::Persistent => StorageScope::Session,
            StorageScope::Session => StorageScope::Persistent,
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageScope::Persistent => f.write_str("persistent"),
            StorageScope::Session => f.write_str("session"),
        }
    }
}

/// A single string key/value scope.
///
/// Methods take `&self`: implementations use interior mutability so a
/// store can sit behind an `Arc` and be shared with whoever needs it.
pub trait Store: Send + Sync + 'static {
    /// Returns the value for `key`, or `Ok(None)` if it isn't set.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Sets `key` to `value`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Sharing a store: keep one `Arc` to inspect it while another `Arc`
/// lives inside a [`ScopedStorage`].
impl<S: Store + ?Sized> Store for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// The persistent and session scopes, side by side.
pub struct ScopedStorage {
    persistent: Box<dyn Store>,
    session: Box<dyn Store>,
}

impl ScopedStorage {
    /// Pairs a persistent store with a session store.
    pub fn new(persistent: impl Store, session: impl Store) -> Self {
        Self {
            persistent: Box::new(persistent),
            session: Box::new(session),
        }
    }

    /// Two in-memory scopes. Nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryStore::new())
    }

    /// Returns the store backing `scope`.
    pub fn scope(&self, scope: StorageScope) -> &dyn Store {
        match scope {
            StorageScope::Persistent => self.persistent.as_ref(),
            StorageScope::Session => self.session.as_ref(),
        }
    }

    /// Reads `key` from the persistent scope, falling back to the session
    /// scope. Empty values count as absent.
    ///
    /// Returns the value together with the scope it was found in.
    pub fn get_first(
        &self,
        key: &str,
    ) -> Result<Option<(String, StorageScope)>, StorageError> {
        for scope in [StorageScope::Persistent, StorageScope::Session] {
            if let Some(value) = self.scope(scope).get(key)? {
                if !value.is_empty() {
                    return Ok(Some((value, scope)));
                }
            }
        }
        Ok(None)
    }
}

impl Default for ScopedStorage {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for ScopedStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedStorage").finish_non_exhaustive()
    }
}
