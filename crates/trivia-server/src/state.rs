//! Application state for the API server.

use std::sync::Arc;

use trivia_core::{TriviaEngine, DEFAULT_PAGE_SIZE};
use trivia_storage::{Database, StorageError};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Question engine over the database.
    pub engine: Arc<TriviaEngine<Database>>,
}

impl AppState {
    /// Creates a new application state with the given database.
    pub fn new(db: Database) -> Self {
        Self::with_page_size(db, DEFAULT_PAGE_SIZE)
    }

    /// Creates application state with a custom page size.
    pub fn with_page_size(db: Database, page_size: usize) -> Self {
        Self {
            engine: Arc::new(TriviaEngine::new(db).with_page_size(page_size)),
        }
    }

    /// Creates application state with an in-memory database.
    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Database::in_memory()?))
    }

    /// The database behind the engine.
    pub fn db(&self) -> &Database {
        self.engine.store()
    }
}
