//! HTTP server for Bookshelf.
//!
//! Exposes the book repository as a REST resource: list and create at `/`,
//! read, replace, patch and delete at `/{id}`. Repository outcomes are
//! mapped to status codes and `{"error": ...}` bodies in [`error`].

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, Operation, ServerError, ServerResult};
pub use server::{seed_from_path, BookshelfServer};
pub use state::AppState;
