//! Foundation types for Bookshelf.
//!
//! This crate provides the identifier codec and the schema-less document
//! shape shared by the store, the repository, and the HTTP layer.
//!
//! # Key Types
//!
//! - [`BookId`] — 12-byte document identifier, 24 hex characters externally
//! - [`Value`] — closed union of the values a book field may hold
//! - [`Fields`] — ordered field-name → value mapping
//! - [`Book`] — a stored document rendered with its identifier

pub mod book;
pub mod error;
pub mod id;
pub mod value;

pub use book::{take_id, Book, ID_FIELD};
pub use error::TypeError;
pub use id::BookId;
pub use value::{fields_from_json, Fields, Value};
