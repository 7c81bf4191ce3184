use shelf_types::{Book, BookId, Fields};

use crate::error::StoreResult;
use crate::query::Query;

/// Result of [`DocumentStore::replace_one`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaceResult {
    /// Documents that matched the identifier before the write (0 or 1).
    pub matched_count: u64,
    /// Set when no document matched and the write created one.
    pub upserted_id: Option<BookId>,
}

/// Result of [`DocumentStore::update_one`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched_count: u64,
    /// Documents whose fields actually changed.
    pub modified_count: u64,
}

/// Result of [`DocumentStore::delete_one`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

/// Single-collection document store.
///
/// All implementations must satisfy these invariants:
/// - Identifiers handed to the store are already well-formed; the store
///   never sees external strings.
/// - Each call that names one document is atomic at the document level.
/// - `find` returns documents in the store's natural (insertion) order.
/// - `update_one` never creates a document.
/// - Backend failures are returned, never silently ignored.
///
/// Methods are synchronous and are called directly from async request
/// handlers. A backend that performs network or disk I/O must not block the
/// calling worker thread: it either completes quickly or hands the work to
/// `tokio::task::block_in_place`/a dedicated thread pool internally.
pub trait DocumentStore: Send + Sync {
    /// All documents matching `query`, in natural order.
    fn find(&self, query: &Query) -> StoreResult<Vec<Book>>;

    /// Read one document by identifier.
    ///
    /// Returns `Ok(None)` if no such document exists.
    fn find_one(&self, id: &BookId) -> StoreResult<Option<Book>>;

    /// Insert a new document and return its identifier.
    ///
    /// With `id == None` the store assigns a fresh identifier. Returns
    /// [`StoreError::DuplicateKey`](crate::StoreError::DuplicateKey) if the
    /// caller-supplied identifier is taken.
    fn insert_one(&self, id: Option<BookId>, fields: Fields) -> StoreResult<BookId>;

    /// Overwrite the whole field set of the document at `id`.
    ///
    /// When nothing matches and `upsert` is set, a document is created at
    /// `id` and reported through `upserted_id`.
    fn replace_one(&self, id: &BookId, fields: Fields, upsert: bool) -> StoreResult<ReplaceResult>;

    /// Merge `fields` into the document at `id`, field by field.
    fn update_one(&self, id: &BookId, fields: Fields) -> StoreResult<UpdateResult>;

    /// Delete the document at `id`.
    fn delete_one(&self, id: &BookId) -> StoreResult<DeleteResult>;

    /// Number of documents in the collection.
    ///
    /// Default implementation scans with an empty query. Backends may
    /// override with a cheaper count.
    fn count(&self) -> StoreResult<usize> {
        self.find(&Query::all()).map(|books| books.len())
    }
}
