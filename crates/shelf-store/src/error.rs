use shelf_types::BookId;

/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A document with this identifier already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(BookId),

    /// A writer panicked while holding the collection lock.
    #[error("collection lock poisoned")]
    LockPoisoned,

    /// The backend could not be reached or timed out.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A document could not be encoded or decoded by the backend.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
