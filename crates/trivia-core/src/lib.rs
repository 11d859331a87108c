//! Trivia Core - question retrieval and quiz selection.
//!
//! This crate holds the rules for serving trivia questions:
//!
//! - Pagination of id-ordered question lists
//! - Case-insensitive search over question text
//! - Category filtering
//! - Non-repeating random selection for quiz play
//! - The result shapes returned to clients
//!
//! Persistence is behind the [`QuestionStore`] trait; `trivia-storage`
//! provides the SQLite implementation.
//!
//! # Example
//!
//! ```ignore
//! use trivia_core::{QuizRequest, QuizScope, TriviaEngine};
//!
//! let engine = TriviaEngine::new(store);
//! let page = engine.list_questions(1)?;
//! let next = engine.next_question(&QuizRequest::new(QuizScope::Any, [1, 2]))?;
//! ```

pub mod category_filter;
pub mod engine;
pub mod error;
pub mod models;
pub mod pagination;
pub mod quiz;
pub mod response;
pub mod search;
pub mod store;

#[cfg(test)]
mod testing;

pub use engine::{validate_new_question, TriviaEngine};
pub use error::{Result, StoreError, StoreResult, TriviaError};
pub use models::{Category, NewQuestion, Question, MAX_DIFFICULTY, MIN_DIFFICULTY};
pub use pagination::{paginate, parse_page, DEFAULT_PAGE_SIZE};
pub use quiz::{QuizRequest, QuizScope};
pub use response::{
    assemble_list, assemble_single, category_map, FormattedQuestion, QuestionList, QuizQuestion,
    ALL_CATEGORIES_LABEL,
};
pub use store::QuestionStore;
