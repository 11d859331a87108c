//! In-memory store used by the engine's unit tests.

use std::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::models::{Category, NewQuestion, Question};
use crate::store::QuestionStore;

#[derive(Default)]
struct Tables {
    questions: Vec<Question>,
    categories: Vec<Category>,
    next_question_id: i64,
    next_category_id: i64,
}

/// Vec-backed store that keeps both tables sorted by id.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the given categories and `count` questions spread over them
    /// round-robin, numbered from 1.
    pub fn seeded(labels: &[&str], count: usize) -> Self {
        let store = Self::new();
        let categories: Vec<Category> = labels
            .iter()
            .map(|label| store.create_category(label).unwrap())
            .collect();

        for n in 0..count {
            let category = &categories[n % categories.len()];
            store
                .create_question(NewQuestion::new(
                    format!("Question number {}", n + 1),
                    format!("Answer {}", n + 1),
                    category.id,
                    (n as i64 % 5) + 1,
                ))
                .unwrap();
        }

        store
    }

    /// Insert a question with an explicit id.
    pub fn insert_with_id(&self, id: i64, text: &str, category_id: i64) {
        let mut tables = self.tables.lock().unwrap();
        tables.questions.push(Question {
            id,
            text: text.to_string(),
            answer: "answer".to_string(),
            category_id,
            difficulty: 1,
        });
        tables.questions.sort_by_key(|q| q.id);
        tables.next_question_id = tables.next_question_id.max(id);
    }

    /// Insert a category with an explicit id.
    pub fn insert_category_with_id(&self, id: i64, label: &str) {
        let mut tables = self.tables.lock().unwrap();
        tables.categories.push(Category {
            id,
            label: label.to_string(),
        });
        tables.categories.sort_by_key(|c| c.id);
        tables.next_category_id = tables.next_category_id.max(id);
    }
}

impl QuestionStore for MemoryStore {
    fn list_all_questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.tables.lock().unwrap().questions.clone())
    }

    fn list_questions_by_category(&self, category_id: i64) -> StoreResult<Vec<Question>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .questions
            .iter()
            .filter(|q| q.category_id == category_id)
            .cloned()
            .collect())
    }

    fn count_questions(&self) -> StoreResult<i64> {
        Ok(self.tables.lock().unwrap().questions.len() as i64)
    }

    fn get_category(&self, category_id: i64) -> StoreResult<Option<Category>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .cloned())
    }

    fn list_all_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.lock().unwrap().categories.clone())
    }

    fn create_question(&self, question: NewQuestion) -> StoreResult<Question> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_question_id += 1;
        let created = Question {
            id: tables.next_question_id,
            text: question.text,
            answer: question.answer,
            category_id: question.category_id,
            difficulty: question.difficulty,
        };
        tables.questions.push(created.clone());
        Ok(created)
    }

    fn delete_question(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);
        Ok(tables.questions.len() < before)
    }

    fn create_category(&self, label: &str) -> StoreResult<Category> {
        let mut tables = self.tables.lock().unwrap();
        if tables.categories.iter().any(|c| c.label == label) {
            return Err(StoreError::Duplicate(format!("category '{}'", label)));
        }
        tables.next_category_id += 1;
        let created = Category {
            id: tables.next_category_id,
            label: label.to_string(),
        };
        tables.categories.push(created.clone());
        Ok(created)
    }
}
