//! Trivia Storage - SQLite persistence layer.
//!
//! This crate implements the [`QuestionStore`](trivia_core::QuestionStore)
//! contract on top of SQLite. It handles:
//!
//! - Question and category tables with schema migrations
//! - Seeding the stock categories on a fresh database
//! - Connection settings ([`StorageConfig`])
//!
//! # Example
//!
//! ```no_run
//! use trivia_core::{NewQuestion, QuestionStore};
//! use trivia_storage::Database;
//!
//! let db = Database::in_memory().unwrap();
//!
//! db.create_question(NewQuestion::new("Who discovered penicillin?", "Alexander Fleming", 1, 3))
//!     .unwrap();
//! assert_eq!(db.count_questions().unwrap(), 1);
//! ```

pub mod config;
mod database;
pub mod error;
mod pool;
pub mod repository;
mod schema;

pub use config::StorageConfig;
pub use database::Database;
pub use error::{Result, StorageError};
pub use pool::ConnectionPool;
pub use repository::{CategoriesRepo, QuestionsRepo};
pub use schema::DEFAULT_CATEGORIES;
