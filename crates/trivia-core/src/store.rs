//! Storage gateway contract consumed by the engine.

use std::sync::Arc;

use crate::error::StoreResult;
use crate::models::{Category, NewQuestion, Question};

/// Create/read/delete access to questions and categories.
///
/// Every listing is ordered ascending by id. Implementations own their
/// transactional discipline; a created question must be visible to the
/// next read.
pub trait QuestionStore: Send + Sync {
    /// All questions, ascending by id.
    fn list_all_questions(&self) -> StoreResult<Vec<Question>>;

    /// Questions of one category, ascending by id.
    fn list_questions_by_category(&self, category_id: i64) -> StoreResult<Vec<Question>>;

    /// Total number of stored questions.
    fn count_questions(&self) -> StoreResult<i64>;

    /// Look up a category by id.
    fn get_category(&self, category_id: i64) -> StoreResult<Option<Category>>;

    /// All categories, ascending by id.
    fn list_all_categories(&self) -> StoreResult<Vec<Category>>;

    /// Insert a question and return it with its assigned id.
    fn create_question(&self, question: NewQuestion) -> StoreResult<Question>;

    /// Delete a question. Returns `true` if a row was removed.
    fn delete_question(&self, id: i64) -> StoreResult<bool>;

    /// Insert a category, failing with `StoreError::Duplicate` if the label exists.
    fn create_category(&self, label: &str) -> StoreResult<Category>;
}

impl<T: QuestionStore + ?Sized> QuestionStore for Arc<T> {
    fn list_all_questions(&self) -> StoreResult<Vec<Question>> {
        (**self).list_all_questions()
    }

    fn list_questions_by_category(&self, category_id: i64) -> StoreResult<Vec<Question>> {
        (**self).list_questions_by_category(category_id)
    }

    fn count_questions(&self) -> StoreResult<i64> {
        (**self).count_questions()
    }

    fn get_category(&self, category_id: i64) -> StoreResult<Option<Category>> {
        (**self).get_category(category_id)
    }

    fn list_all_categories(&self) -> StoreResult<Vec<Category>> {
        (**self).list_all_categories()
    }

    fn create_question(&self, question: NewQuestion) -> StoreResult<Question> {
        (**self).create_question(question)
    }

    fn delete_question(&self, id: i64) -> StoreResult<bool> {
        (**self).delete_question(id)
    }

    fn create_category(&self, label: &str) -> StoreResult<Category> {
        (**self).create_category(label)
    }
}
