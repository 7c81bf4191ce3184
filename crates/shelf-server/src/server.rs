use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use shelf_repo::BookRepository;
use shelf_store::InMemoryDocumentStore;
use shelf_types::fields_from_json;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Bookshelf REST server.
pub struct BookshelfServer {
    config: ServerConfig,
    repo: BookRepository,
}

impl BookshelfServer {
    /// Server over a fresh in-memory collection named after the config.
    pub fn new(config: ServerConfig) -> Self {
        let store = InMemoryDocumentStore::named(config.collection.clone());
        let repo = BookRepository::new(Arc::new(store));
        Self::with_repository(config, repo)
    }

    /// Server over an existing repository (and whatever store backs it).
    pub fn with_repository(config: ServerConfig, repo: BookRepository) -> Self {
        Self { config, repo }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn repository(&self) -> &BookRepository {
        &self.repo
    }

    /// Load the configured seed file, if any. Returns the number of books
    /// inserted.
    pub fn load_seed(&self) -> ServerResult<usize> {
        match &self.config.seed {
            Some(path) => seed_from_path(&self.repo, path),
            None => Ok(0),
        }
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(self.repo.clone(), self.config.clone()))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let seeded = self.load_seed()?;
        if seeded > 0 {
            tracing::info!(count = seeded, "loaded seed books");
        }
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            collection = %self.config.collection,
            "bookshelf server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

/// Insert every book of a JSON array file through the repository, so seeded
/// ids get the same validation as requests.
pub fn seed_from_path(repo: &BookRepository, path: &Path) -> ServerResult<usize> {
    let text = std::fs::read_to_string(path)?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&text)
        .map_err(|e| ServerError::Seed(format!("{}: {e}", path.display())))?;

    let mut count = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        let fields = fields_from_json(entry)
            .map_err(|e| ServerError::Seed(format!("entry {index}: {e}")))?;
        repo.create(fields)
            .map_err(|e| ServerError::Seed(format!("entry {index}: {e}")))?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_repo::BookFilter;
    use std::io::Write;

    fn seed_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn server_construction() {
        let server = BookshelfServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(server.load_seed().unwrap(), 0);
    }

    #[test]
    fn router_builds() {
        let server = BookshelfServer::new(ServerConfig::default());
        let _router = server.router();
    }

    #[test]
    fn seed_loads_books_in_order() {
        let file = seed_file(
            r#"[
                {"_id": "5a80868574fdd6de0f4fa430", "title": "War and Peace"},
                {"title": "Lord of the Flies"}
            ]"#,
        );
        let config = ServerConfig {
            seed: Some(file.path().to_path_buf()),
            ..ServerConfig::default()
        };
        let server = BookshelfServer::new(config);
        assert_eq!(server.load_seed().unwrap(), 2);

        let books = server.repository().list(&BookFilter::new()).unwrap();
        assert_eq!(books[0].id.to_hex(), "5a80868574fdd6de0f4fa430");
        assert_eq!(books.len(), 2);
    }

    #[test]
    fn seed_rejects_bad_identifier() {
        let file = seed_file(r#"[{"_id": "5a80868574fdd", "title": "X"}]"#);
        let repo = BookRepository::in_memory();
        let err = seed_from_path(&repo, file.path()).unwrap_err();
        assert!(matches!(err, ServerError::Seed(msg) if msg.starts_with("entry 0")));
    }

    #[test]
    fn seed_must_be_an_array() {
        let file = seed_file(r#"{"title": "X"}"#);
        let repo = BookRepository::in_memory();
        assert!(matches!(
            seed_from_path(&repo, file.path()),
            Err(ServerError::Seed(_))
        ));
    }
}
