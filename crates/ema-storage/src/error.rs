/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[source] std::io::Error),

    /// The backing file exists but isn't a valid key/value document.
    #[error("storage file is corrupt: {0}")]
    Corrupt(String),

    /// A previous writer panicked while holding the store's lock.
    #[error("storage lock poisoned")]
    Poisoned,
}
