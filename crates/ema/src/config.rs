//! Portal configuration: API location, session behavior, storage location.

use std::path::{Path, PathBuf};

use ema_client::ClientConfig;
use ema_session::{ScopePolicy, SessionConfig};
use ema_storage::{FileStore, MemoryStore, ScopedStorage};
use serde::{Deserialize, Serialize};

use crate::EmaError;

/// Environment variable naming the directory for the persistent scope.
pub const STORAGE_DIR_ENV: &str = "EMA_STORAGE_DIR";

/// Environment variable switching the session to
/// [`ScopePolicy::ClearOtherScope`].
pub const CLEAR_OTHER_SCOPE_ENV: &str = "EMA_CLEAR_OTHER_SCOPE";

/// File name of the persistent scope inside `storage_dir`.
pub const PERSISTENT_FILE: &str = "persistent.json";

/// Everything needed to assemble a [`Portal`](crate::Portal).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// The auth API.
    pub api: ClientConfig,

    /// Session behavior.
    pub session: SessionConfig,

    /// Where the persistent scope is written. `None` keeps both scopes in
    /// memory, so nothing survives a restart.
    pub storage_dir: Option<PathBuf>,
}

impl PortalConfig {
    /// Defaults overridden by the environment:
    ///
    /// | Variable | Effect |
    /// |---|---|
    /// | `EMA_API_URL` | API base URL |
    /// | `EMA_API_TIMEOUT_SECS` | request timeout |
    /// | `EMA_STORAGE_DIR` | directory for `persistent.json` |
    /// | `EMA_CLEAR_OTHER_SCOPE` | `true`/`false` (also `1`/`0`, `yes`/`no`) |
    ///
    /// # Errors
    /// [`EmaError::Config`] if `EMA_CLEAR_OTHER_SCOPE` isn't a boolean.
    pub fn from_env() -> Result<Self, EmaError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EmaError> {
        let mut config = Self {
            api: ClientConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(dir) = lookup(STORAGE_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.storage_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup(CLEAR_OTHER_SCOPE_ENV) {
            if parse_flag(&raw)? {
                config.session.scope_policy = ScopePolicy::ClearOtherScope;
            }
        }

        Ok(config)
    }

    /// Opens the storage scopes this config describes.
    ///
    /// With a `storage_dir`, the persistent scope is
    /// `<storage_dir>/persistent.json`; the session scope is always in
    /// memory.
    ///
    /// A persistent file that doesn't parse is discarded, so the portal
    /// starts logged out instead of failing.
    ///
    /// # Errors
    /// [`EmaError::Storage`] if the persistent file exists but can't be
    /// read.
    pub fn open_storage(&self) -> Result<ScopedStorage, EmaError> {
        match &self.storage_dir {
            Some(dir) => {
                let persistent = FileStore::open(persistent_path(dir))?;
                Ok(ScopedStorage::new(persistent, MemoryStore::new()))
            }
            None => Ok(ScopedStorage::in_memory()),
        }
    }
}

fn persistent_path(dir: &Path) -> PathBuf {
    dir.join(PERSISTENT_FILE)
}

fn parse_flag(raw: &str) -> Result<bool, EmaError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(EmaError::Config(format!(
            "{CLEAR_OTHER_SCOPE_ENV} must be a boolean, got {other:?}"
        ))),
    }
}
