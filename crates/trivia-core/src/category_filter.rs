//! Restrict the question set to one category.

use crate::error::{Result, TriviaError};
use crate::models::{Category, Question};
use crate::store::QuestionStore;

/// A resolved category and its questions, ascending by id.
#[derive(Debug, Clone)]
pub struct CategoryQuestions {
    pub category: Category,
    pub questions: Vec<Question>,
}

/// Resolve a category id, failing with `NotFound` if it is unknown.
pub fn resolve_category<S: QuestionStore + ?Sized>(store: &S, category_id: i64) -> Result<Category> {
    store
        .get_category(category_id)?
        .ok_or_else(|| TriviaError::NotFound(format!("category {}", category_id)))
}

/// All questions of an existing category. An empty category is not an error.
pub fn filter_by_category<S: QuestionStore + ?Sized>(
    store: &S,
    category_id: i64,
) -> Result<CategoryQuestions> {
    let category = resolve_category(store, category_id)?;
    let questions = store.list_questions_by_category(category.id)?;
    Ok(CategoryQuestions {
        category,
        questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[test]
    fn test_filters_to_one_category() {
        let store = MemoryStore::seeded(&["Science", "Art"], 7);

        let science = filter_by_category(&store, 1).unwrap();
        assert_eq!(science.category.label, "Science");
        let ids: Vec<i64> = science.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3, 5, 7]);
        assert!(science.questions.iter().all(|q| q.category_id == 1));
    }

    #[test]
    fn test_empty_category_is_ok() {
        let store = MemoryStore::seeded(&["Science"], 3);
        store.insert_category_with_id(9, "Sports");

        let sports = filter_by_category(&store, 9).unwrap();
        assert!(sports.questions.is_empty());
    }

    #[test]
    fn test_unknown_category_is_not_found() {
        let store = MemoryStore::seeded(&["Science"], 3);
        assert!(matches!(
            filter_by_category(&store, 42),
            Err(TriviaError::NotFound(_))
        ));
    }
}
