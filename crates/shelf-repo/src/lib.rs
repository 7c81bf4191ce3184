//! Book repository for Bookshelf.
//!
//! [`BookRepository`] turns external identifiers into [`BookId`]s, runs one
//! store call per operation, and classifies every result into an
//! [`Outcome`]. Callers never see store errors.
//!
//! | Operation | Ok payload | Possible errors |
//! |---|---|---|
//! | [`list`](BookRepository::list) | `Vec<Book>` | `Internal` |
//! | [`get`](BookRepository::get) | `Book` | `InvalidIdentifier`, `NotFound`, `Internal` |
//! | [`create`](BookRepository::create) | `Book` | `InvalidIdentifier`, `Conflict`, `Internal` |
//! | [`replace`](BookRepository::replace) | [`Upserted`] | `InvalidIdentifier`, `Internal` |
//! | [`update`](BookRepository::update) | [`Patched`] | `InvalidIdentifier`, `NotFound`, `Internal` |
//! | [`delete`](BookRepository::delete) | `BookId` | `InvalidIdentifier`, `NotFound`, `Internal` |
//!
//! [`BookId`]: shelf_types::BookId

pub mod error;
pub mod filter;
pub mod repository;

pub use error::{Outcome, RepositoryError};
pub use filter::{BookFilter, FilterError};
pub use repository::{BookRepository, Patched, Upserted, WriteKind};
