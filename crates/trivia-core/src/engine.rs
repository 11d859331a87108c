//! The engine: every trivia operation composed over a [`QuestionStore`].

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info};

use crate::category_filter::{filter_by_category, resolve_category};
use crate::error::{Result, StoreError, TriviaError};
use crate::models::{Category, NewQuestion, Question, MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::pagination::{paginate, DEFAULT_PAGE_SIZE};
use crate::quiz::{self, QuizRequest};
use crate::response::{assemble_list, assemble_single, QuestionList, QuizQuestion};
use crate::search;
use crate::store::QuestionStore;

/// Stateless facade over a store. Safe to share between request handlers.
pub struct TriviaEngine<S> {
    store: S,
    page_size: usize,
}

impl<S: QuestionStore> TriviaEngine<S> {
    /// Create an engine with the default page size.
    pub fn new(store: S) -> Self {
        Self {
            store,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // === Listing ===

    /// One page of all questions.
    pub fn list_questions(&self, page: usize) -> Result<QuestionList> {
        let all = self.store.list_all_questions()?;
        let slice = paginate(&all, page, self.page_size)?;
        debug!(page, total = all.len(), "Listed questions");
        Ok(assemble_list(slice, all.len(), None))
    }

    /// One page of search results.
    pub fn search_questions(&self, term: &str, page: usize) -> Result<QuestionList> {
        let found = search::search(&self.store, term)?;
        let slice = paginate(&found, page, self.page_size)?;
        Ok(assemble_list(slice, found.len(), None))
    }

    /// One page of a single category's questions.
    pub fn questions_by_category(&self, category_id: i64, page: usize) -> Result<QuestionList> {
        let filtered = filter_by_category(&self.store, category_id)?;
        let slice = paginate(&filtered.questions, page, self.page_size)?;
        debug!(
            category_id,
            page,
            total = filtered.questions.len(),
            "Listed category questions"
        );
        Ok(assemble_list(
            slice,
            filtered.questions.len(),
            Some(&filtered.category),
        ))
    }

    // === Quiz ===

    /// Next quiz question using the thread-local RNG.
    pub fn next_question(&self, request: &QuizRequest) -> Result<QuizQuestion> {
        self.next_question_with_rng(request, &mut rand::thread_rng())
    }

    /// Next quiz question using a caller-supplied RNG.
    pub fn next_question_with_rng<R: Rng + ?Sized>(
        &self,
        request: &QuizRequest,
        rng: &mut R,
    ) -> Result<QuizQuestion> {
        let picked = quiz::next_question(&self.store, request, rng)?;
        Ok(assemble_single(picked))
    }

    // === Categories ===

    /// All categories. With `quiz_only`, only those that have questions.
    pub fn list_categories(&self, quiz_only: bool) -> Result<Vec<Category>> {
        let categories = self.store.list_all_categories()?;
        if !quiz_only {
            return Ok(categories);
        }

        let used: HashSet<i64> = self
            .store
            .list_all_questions()?
            .iter()
            .map(|q| q.category_id)
            .collect();

        Ok(categories
            .into_iter()
            .filter(|c| used.contains(&c.id))
            .collect())
    }

    /// Create a category with a unique, non-blank label.
    pub fn create_category(&self, label: &str) -> Result<Category> {
        let label = label.trim();
        if label.is_empty() {
            return Err(TriviaError::BadRequest(
                "category must not be empty".to_string(),
            ));
        }

        match self.store.create_category(label) {
            Ok(category) => {
                info!(id = category.id, label = %category.label, "Created category");
                Ok(category)
            }
            Err(StoreError::Duplicate(what)) => Err(TriviaError::AlreadyExists(what)),
            Err(e) => Err(e.into()),
        }
    }

    // === Questions ===

    /// Validate and store a new question.
    ///
    /// Blank text/answer and out-of-range difficulty are rejected before the
    /// store is consulted.
    pub fn create_question(&self, question: NewQuestion) -> Result<Question> {
        let question = validate_new_question(question)?;
        resolve_category(&self.store, question.category_id)?;

        let created = self.store.create_question(question)?;
        info!(
            id = created.id,
            category_id = created.category_id,
            "Created question"
        );
        Ok(created)
    }

    /// Delete a question, returning the number of questions left.
    pub fn delete_question(&self, id: i64) -> Result<i64> {
        if !self.store.delete_question(id)? {
            return Err(TriviaError::Unprocessable(format!(
                "question {} cannot be deleted",
                id
            )));
        }

        info!(id, "Deleted question");
        Ok(self.store.count_questions()?)
    }
}

/// Trim and check the fields of a new question.
pub fn validate_new_question(question: NewQuestion) -> Result<NewQuestion> {
    let text = question.text.trim();
    let answer = question.answer.trim();

    if text.is_empty() || answer.is_empty() {
        return Err(TriviaError::BadRequest(
            "question and answer must not be empty".to_string(),
        ));
    }

    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&question.difficulty) {
        return Err(TriviaError::BadRequest(format!(
            "difficulty must be between {} and {}",
            MIN_DIFFICULTY, MAX_DIFFICULTY
        )));
    }

    Ok(NewQuestion {
        text: text.to_string(),
        answer: answer.to_string(),
        category_id: question.category_id,
        difficulty: question.difficulty,
    })
}
