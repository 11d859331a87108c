//! Case-insensitive substring search over question text.

use tracing::debug;

use crate::error::{Result, TriviaError};
use crate::models::Question;
use crate::store::QuestionStore;

/// Trim and lowercase a search term, rejecting blank input.
pub fn normalize_term(term: &str) -> Result<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(TriviaError::Unprocessable(
            "search term must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_lowercase())
}

/// Whether `text` contains an already-normalized `needle`.
pub fn matches(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(needle)
}

/// Keep the questions whose text contains `term`, preserving order.
///
/// Answers are not searched.
pub fn filter_questions(questions: Vec<Question>, term: &str) -> Result<Vec<Question>> {
    let needle = normalize_term(term)?;
    Ok(questions
        .into_iter()
        .filter(|q| matches(&q.text, &needle))
        .collect())
}

/// Search all stored questions. An empty result is not an error here.
pub fn search<S: QuestionStore + ?Sized>(store: &S, term: &str) -> Result<Vec<Question>> {
    // Reject blank terms before touching the store.
    normalize_term(term)?;

    let found = filter_questions(store.list_all_questions()?, term)?;
    debug!(term = term.trim(), matches = found.len(), "Searched questions");
    Ok(found)
}
