use std::sync::Arc;

use shelf_store::{DocumentStore, InMemoryDocumentStore, StoreError};
use shelf_types::{take_id, Book, BookId, Fields, Value};

use crate::error::{Outcome, RepositoryError};
use crate::filter::BookFilter;

/// Whether a full replace found a document to overwrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteKind {
    /// No document existed; one was created at the requested id.
    Created,
    /// An existing document's fields were overwritten.
    Replaced,
}

/// Success payload of [`BookRepository::replace`].
#[derive(Clone, Debug, PartialEq)]
pub struct Upserted {
    /// The document as written: path id plus the supplied fields.
    pub book: Book,
    pub kind: WriteKind,
}

/// Success payload of [`BookRepository::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Patched {
    pub id: BookId,
    /// Always at least 1.
    pub matched_count: u64,
    pub modified_count: u64,
}

/// CRUD operations over the book collection.
///
/// The repository keeps no state of its own besides the injected store
/// handle, so it is cheap to clone and share across request handlers.
/// Every operation that takes an external id validates it before touching
/// the store: a malformed id is always `InvalidIdentifier`, never
/// `NotFound`.
#[derive(Clone)]
pub struct BookRepository {
    store: Arc<dyn DocumentStore>,
}

impl BookRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Repository over a fresh, empty in-memory collection.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryDocumentStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Books matching `filter`, in store order. No match is an empty list.
    pub fn list(&self, filter: &BookFilter) -> Outcome<Vec<Book>> {
        tracing::debug!(?filter, "listing books");
        self.store
            .find(&filter.to_query())
            .map_err(|e| internal("list", e))
    }

    pub fn get(&self, external_id: &str) -> Outcome<Book> {
        let id = decode(external_id)?;
        tracing::debug!(%id, "fetching book");
        self.store
            .find_one(&id)
            .map_err(|e| internal("get", e))?
            .ok_or(RepositoryError::NotFound)
    }

    /// Insert a new book.
    ///
    /// A string `_id` in `fields` names the new document; without one the
    /// store assigns an id. The returned book echoes `fields` with the final
    /// id, not a re-read of the stored document.
    pub fn create(&self, mut fields: Fields) -> Outcome<Book> {
        let requested = match take_id(&mut fields) {
            None => None,
            Some(Value::String(s)) => Some(decode(&s)?),
            Some(other) => {
                tracing::warn!(kind = other.kind(), "rejected non-string identifier");
                return Err(RepositoryError::InvalidIdentifier);
            }
        };

        match self.store.insert_one(requested, fields.clone()) {
            Ok(id) => {
                tracing::info!(%id, caller_assigned = requested.is_some(), "created book");
                Ok(Book::new(id, fields))
            }
            Err(StoreError::DuplicateKey(id)) => {
                tracing::debug!(%id, "create conflicts with existing book");
                Err(RepositoryError::Conflict)
            }
            Err(e) => Err(internal("create", e)),
        }
    }

    /// Overwrite the book at `external_id` with `fields`, creating it if
    /// absent. Any `_id` in `fields` is ignored in favor of the path id.
    pub fn replace(&self, external_id: &str, mut fields: Fields) -> Outcome<Upserted> {
        let id = decode(external_id)?;
        take_id(&mut fields);

        let result = self
            .store
            .replace_one(&id, fields.clone(), true)
            .map_err(|e| internal("replace", e))?;

        let kind = if result.upserted_id.is_some() {
            WriteKind::Created
        } else {
            WriteKind::Replaced
        };
        tracing::info!(%id, ?kind, "replaced book");
        Ok(Upserted {
            book: Book::new(id, fields),
            kind,
        })
    }

    /// Merge `patch` into the book at `external_id`. Never creates a book.
    pub fn update(&self, external_id: &str, mut patch: Fields) -> Outcome<Patched> {
        let id = decode(external_id)?;
        take_id(&mut patch);

        let result = self
            .store
            .update_one(&id, patch)
            .map_err(|e| internal("update", e))?;
        if result.matched_count == 0 {
            return Err(RepositoryError::NotFound);
        }
        tracing::info!(%id, modified = result.modified_count, "updated book");
        Ok(Patched {
            id,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    pub fn delete(&self, external_id: &str) -> Outcome<BookId> {
        let id = decode(external_id)?;
        let result = self
            .store
            .delete_one(&id)
            .map_err(|e| internal("delete", e))?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::NotFound);
        }
        tracing::info!(%id, "deleted book");
        Ok(id)
    }
}

impl std::fmt::Debug for BookRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookRepository").finish_non_exhaustive()
    }
}

fn decode(external_id: &str) -> Outcome<BookId> {
    BookId::parse(external_id).map_err(|e| {
        tracing::warn!(id = external_id, error = %e, "rejected identifier");
        RepositoryError::InvalidIdentifier
    })
}

fn internal(op: &'static str, err: StoreError) -> RepositoryError {
    tracing::error!(op, error = %err, "store failure");
    RepositoryError::Internal(err.to_string())
}
