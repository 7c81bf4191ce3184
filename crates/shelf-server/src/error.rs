use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use shelf_repo::{FilterError, RepositoryError};

/// Errors raised while configuring or starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("seed data error: {0}")]
    Seed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Operation a request was routed to; selects the not-found wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Replace,
    Update,
    Delete,
}

/// A failed request, rendered as `{"error": "<message>"}`.
///
/// `Display` carries the diagnostic form for logs; clients only ever see
/// [`ApiError::client_message`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid identifier")]
    InvalidIdentifier,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] FilterError),

    #[error("{op:?} found no book {id}")]
    NotFound { id: String, op: Operation },

    #[error("identifier already exists")]
    Conflict,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Classify a repository failure for the request that produced it.
    pub fn from_repository(err: RepositoryError, op: Operation, id: &str) -> Self {
        match err {
            RepositoryError::InvalidIdentifier => Self::InvalidIdentifier,
            RepositoryError::NotFound => Self::NotFound {
                id: id.to_string(),
                op,
            },
            RepositoryError::Conflict => Self::Conflict,
            RepositoryError::Internal(detail) => Self::Internal(detail),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier | Self::InvalidBody(_) | Self::InvalidFilter(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable, client-facing wording.
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidIdentifier => "The id specified is not a valid id".into(),
            Self::InvalidBody(_) => {
                "The request body must be a JSON object of scalar fields".into()
            }
            Self::InvalidFilter(FilterError::NotAnInteger { param, .. }) => {
                format!("Query parameter {param} must be an integer")
            }
            Self::NotFound { id, op } => match op {
                Operation::Update => format!("No book with an id of {id} found to update"),
                Operation::Delete => format!("No book with an id of {id} found to delete"),
                _ => format!("No book with an id of {id} found"),
            },
            Self::Conflict => {
                "The id specified already exists, please choose a different one".into()
            }
            Self::Internal(_) => "An error occurred while processing your request".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "request failed"),
            _ => tracing::debug!(error = %self, status = status.as_u16(), "request rejected"),
        }
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}
