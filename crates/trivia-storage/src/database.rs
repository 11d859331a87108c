//! High-level database interface.

use std::path::PathBuf;

use tracing::info;
use trivia_core::{Category, NewQuestion, Question, QuestionStore, StoreResult};

use crate::config::StorageConfig;
use crate::error::{Result, StorageError};
use crate::pool::ConnectionPool;
use crate::repository::{CategoriesRepo, QuestionsRepo};

/// High-level database interface for Trivia.
#[derive(Clone)]
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    /// Open the database described by `config`.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        if config.is_in_memory() {
            info!("Opening in-memory database");
            return Self::in_memory();
        }

        info!(
            database = %config.database_name,
            owner = ?config.owner,
            port = ?config.port,
            "Resolving database location"
        );
        Self::with_path(config.db_path()?)
    }

    /// Create a new database at a specific path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("Opening database at: {:?}", path);
        let pool = ConnectionPool::new(&path)?;

        Ok(Self { pool })
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        let pool = ConnectionPool::in_memory()?;
        Ok(Self { pool })
    }

    // === Questions ===

    /// Insert a question and read it back.
    pub fn insert_question(&self, question: &NewQuestion) -> Result<Question> {
        let conn = self.pool.get()?;
        let id = QuestionsRepo::insert(&conn, question)?;
        QuestionsRepo::get_by_id(&conn, id)?
            .ok_or_else(|| StorageError::NotFound(format!("Question with id {}", id)))
    }

    /// Get a question by ID.
    pub fn get_question(&self, id: i64) -> Result<Option<Question>> {
        let conn = self.pool.get()?;
        QuestionsRepo::get_by_id(&conn, id)
    }

    /// Get all questions.
    pub fn get_all_questions(&self) -> Result<Vec<Question>> {
        let conn = self.pool.get()?;
        QuestionsRepo::get_all(&conn)
    }

    /// Get the questions of a category.
    pub fn get_questions_by_category(&self, category_id: i64) -> Result<Vec<Question>> {
        let conn = self.pool.get()?;
        QuestionsRepo::get_by_category(&conn, category_id)
    }

    /// Delete a question.
    pub fn remove_question(&self, id: i64) -> Result<bool> {
        let conn = self.pool.get()?;
        QuestionsRepo::delete(&conn, id)
    }

    /// Count total questions.
    pub fn count_all_questions(&self) -> Result<i64> {
        let conn = self.pool.get()?;
        QuestionsRepo::count(&conn)
    }

    // === Categories ===

    /// Insert a category with a label that must not exist yet.
    pub fn insert_category(&self, label: &str) -> Result<Category> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        if CategoriesRepo::get_by_label(&tx, label)?.is_some() {
            return Err(StorageError::Duplicate(format!("category '{}'", label)));
        }

        let id = CategoriesRepo::insert(&tx, label)?;
        tx.commit()?;

        Ok(Category {
            id,
            label: label.to_string(),
        })
    }

    /// Get a category by ID.
    pub fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.pool.get()?;
        CategoriesRepo::get_by_id(&conn, id)
    }

    /// Get all categories.
    pub fn get_all_categories(&self) -> Result<Vec<Category>> {
        let conn = self.pool.get()?;
        CategoriesRepo::get_all(&conn)
    }
}

impl QuestionStore for Database {
    fn list_all_questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.get_all_questions()?)
    }

    fn list_questions_by_category(&self, category_id: i64) -> StoreResult<Vec<Question>> {
        Ok(self.get_questions_by_category(category_id)?)
    }

    fn count_questions(&self) -> StoreResult<i64> {
        Ok(self.count_all_questions()?)
    }

    fn get_category(&self, category_id: i64) -> StoreResult<Option<Category>> {
        Ok(self.get_category_by_id(category_id)?)
    }

    fn list_all_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.get_all_categories()?)
    }

    fn create_question(&self, question: NewQuestion) -> StoreResult<Question> {
        Ok(self.insert_question(&question)?)
    }

    fn delete_question(&self, id: i64) -> StoreResult<bool> {
        Ok(self.remove_question(id)?)
    }

    fn create_category(&self, label: &str) -> StoreResult<Category> {
        Ok(self.insert_category(label)?)
    }
}
