use thiserror::Error;

/// Failure side of a repository call.
///
/// These are the only failures the HTTP layer distinguishes; store-native
/// errors are folded into `Internal` before they leave the repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("identifier is not 24 hex characters")]
    InvalidIdentifier,

    #[error("no matching book")]
    NotFound,

    #[error("identifier already exists")]
    Conflict,

    /// Diagnostic detail only; never shown to clients.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result of a repository call: `Ok` is the success payload.
pub type Outcome<T> = Result<T, RepositoryError>;
