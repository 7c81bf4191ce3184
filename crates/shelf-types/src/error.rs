use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("document has no identifier field")]
    MissingId,

    #[error("identifier field must be a string, got {0}")]
    IdNotAString(&'static str),

    #[error("unsupported value at {field}: {kind}")]
    UnsupportedValue { field: String, kind: &'static str },

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}
