//! Document storage for Bookshelf.
//!
//! This crate defines the capability set the book repository needs from a
//! document store and ships an in-memory backend for tests and embedding.
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`InMemoryDocumentStore`] -- insertion-ordered collection behind a `RwLock`
//!
//! # Design Rules
//!
//! 1. Every call addresses one document, except `find`, which is one scan.
//! 2. Each single-document call is atomic; there are no multi-document
//!    transactions.
//! 3. `replace_one` upserts only when asked; `update_one` never creates.
//! 4. The store never validates field contents beyond the identifier.
//! 5. All backend failures are returned as [`StoreError`], never panics.

pub mod error;
pub mod memory;
pub mod query;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDocumentStore;
pub use query::Query;
pub use traits::{DeleteResult, DocumentStore, ReplaceResult, UpdateResult};
