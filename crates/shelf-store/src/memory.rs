use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use shelf_types::{Book, BookId, Fields};

use crate::error::{StoreError, StoreResult};
use crate::query::Query;
use crate::traits::{DeleteResult, DocumentStore, ReplaceResult, UpdateResult};

type Collection = IndexMap<BookId, Fields>;

/// In-memory, insertion-ordered document collection.
///
/// Intended for tests and embedding. Documents are held behind one `RwLock`;
/// each trait call takes the lock once, so every single-document operation
/// is atomic. Documents are cloned on read.
pub struct InMemoryDocumentStore {
    name: String,
    docs: RwLock<Collection>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store named `books`.
    pub fn new() -> Self {
        Self::named("books")
    }

    /// Create a new empty store with a collection name used in logs.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: RwLock::new(IndexMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Remove all documents.
    pub fn clear(&self) -> StoreResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collection>> {
        self.docs.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collection>> {
        self.docs.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn find(&self, query: &Query) -> StoreResult<Vec<Book>> {
        let docs = self.read()?;
        Ok(docs
            .iter()
            .map(|(id, fields)| Book::new(*id, fields.clone()))
            .filter(|book| query.matches(book))
            .collect())
    }

    fn find_one(&self, id: &BookId) -> StoreResult<Option<Book>> {
        let docs = self.read()?;
        Ok(docs.get(id).map(|fields| Book::new(*id, fields.clone())))
    }

    fn insert_one(&self, id: Option<BookId>, fields: Fields) -> StoreResult<BookId> {
        let mut docs = self.write()?;
        let id = match id {
            Some(id) if docs.contains_key(&id) => return Err(StoreError::DuplicateKey(id)),
            Some(id) => id,
            // Generated ids are unique per process; loop only guards against
            // documents inserted with a caller-chosen id that happens to collide.
            None => loop {
                let candidate = BookId::generate();
                if !docs.contains_key(&candidate) {
                    break candidate;
                }
            },
        };
        docs.insert(id, Book::new(id, fields).fields);
        tracing::trace!(collection = %self.name, %id, "inserted document");
        Ok(id)
    }

    fn replace_one(&self, id: &BookId, fields: Fields, upsert: bool) -> StoreResult<ReplaceResult> {
        let mut docs = self.write()?;
        let fields = Book::new(*id, fields).fields;
        match docs.get_mut(id) {
            Some(existing) => {
                *existing = fields;
                Ok(ReplaceResult {
                    matched_count: 1,
                    upserted_id: None,
                })
            }
            None if upsert => {
                docs.insert(*id, fields);
                Ok(ReplaceResult {
                    matched_count: 0,
                    upserted_id: Some(*id),
                })
            }
            None => Ok(ReplaceResult::default()),
        }
    }

    fn update_one(&self, id: &BookId, fields: Fields) -> StoreResult<UpdateResult> {
        let mut docs = self.write()?;
        let Some(existing) = docs.get_mut(id) else {
            return Ok(UpdateResult::default());
        };
        let mut modified = false;
        for (key, value) in Book::new(*id, fields).fields {
            if existing.get(&key) != Some(&value) {
                existing.insert(key, value);
                modified = true;
            }
        }
        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    fn delete_one(&self, id: &BookId) -> StoreResult<DeleteResult> {
        let mut docs = self.write()?;
        let deleted = docs.shift_remove(id).is_some();
        Ok(DeleteResult {
            deleted_count: u64::from(deleted),
        })
    }

    fn count(&self) -> StoreResult<usize> {
        self.len()
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.docs.read().map(|docs| docs.len()).unwrap_or_default();
        f.debug_struct("InMemoryDocumentStore")
            .field("name", &self.name)
            .field("document_count", &count)
            .finish()
    }
}
