//! Non-repeating random question selection for quiz play.
//!
//! The selector is stateless: the caller resends the growing set of
//! already-asked ids on every call. When nothing is left the result is
//! `Ok(None)`, which is exhaustion and not an error.
//!
//! ## Usage
//!
//! ```
//! use serde_json::json;
//! use trivia_core::quiz::QuizRequest;
//!
//! let request = QuizRequest::from_json(&json!({
//!     "previous_questions": [1, 2],
//!     "quiz_category": {"type": "Science", "id": "1"}
//! }))
//! .unwrap();
//!
//! assert_eq!(request.previous_question_ids.len(), 2);
//! ```

use std::collections::HashSet;

use rand::Rng;
use serde_json::Value;
use tracing::debug;

use crate::category_filter::resolve_category;
use crate::error::{Result, TriviaError};
use crate::models::Question;
use crate::store::QuestionStore;

/// Category scope of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    /// Every stored question is eligible.
    Any,
    /// Only questions of this category are eligible.
    Category(i64),
}

impl QuizScope {
    /// Parse a `quiz_category` value.
    ///
    /// Accepted shapes: `"any"`/`"all"`, an integer id, a numeric string, or
    /// an object carrying such an id under `"id"`. Id `0` means any category.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => match map.get("id") {
                Some(id @ (Value::Number(_) | Value::String(_))) => Self::from_scalar(id),
                _ => Err(malformed_category(value)),
            },
            other => Self::from_scalar(other),
        }
    }

    fn from_scalar(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| malformed_category(value))
                .and_then(Self::from_id),
            Value::String(s) => {
                let token = s.trim();
                if token.eq_ignore_ascii_case("any") || token.eq_ignore_ascii_case("all") {
                    return Ok(QuizScope::Any);
                }
                token
                    .parse::<i64>()
                    .map_err(|_| malformed_category(value))
                    .and_then(Self::from_id)
            }
            _ => Err(malformed_category(value)),
        }
    }

    fn from_id(id: i64) -> Result<Self> {
        match id {
            0 => Ok(QuizScope::Any),
            id if id > 0 => Ok(QuizScope::Category(id)),
            id => Err(TriviaError::BadRequest(format!(
                "invalid quiz category id {}",
                id
            ))),
        }
    }
}

fn malformed_category(value: &Value) -> TriviaError {
    TriviaError::BadRequest(format!("malformed quiz category: {}", value))
}

/// A validated next-question request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub scope: QuizScope,
    pub previous_question_ids: HashSet<i64>,
}

impl QuizRequest {
    pub fn new(scope: QuizScope, previous_question_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            scope,
            previous_question_ids: previous_question_ids.into_iter().collect(),
        }
    }

    /// Validate a `{previous_questions, quiz_category}` payload.
    pub fn from_json(payload: &Value) -> Result<Self> {
        let Value::Object(body) = payload else {
            return Err(TriviaError::BadRequest(
                "quiz payload must be an object".to_string(),
            ));
        };

        let scope = match body.get("quiz_category") {
            Some(value) => QuizScope::from_json(value)?,
            None => {
                return Err(TriviaError::BadRequest(
                    "missing quiz_category".to_string(),
                ))
            }
        };

        let previous = match body.get("previous_questions") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_i64().ok_or_else(|| {
                        TriviaError::BadRequest(format!("invalid question id {}", item))
                    })
                })
                .collect::<Result<HashSet<i64>>>()?,
            Some(other) => {
                return Err(TriviaError::BadRequest(format!(
                    "previous_questions must be a list, got {}",
                    other
                )))
            }
            None => {
                return Err(TriviaError::BadRequest(
                    "missing previous_questions".to_string(),
                ))
            }
        };

        Ok(Self {
            scope,
            previous_question_ids: previous,
        })
    }
}

/// Questions eligible under `scope`, ascending by id.
pub fn resolve_pool<S: QuestionStore + ?Sized>(store: &S, scope: QuizScope) -> Result<Vec<Question>> {
    match scope {
        QuizScope::Any => Ok(store.list_all_questions()?),
        QuizScope::Category(id) => {
            let category = resolve_category(store, id)?;
            Ok(store.list_questions_by_category(category.id)?)
        }
    }
}

/// `pool` minus every question whose id is in `excluded`.
pub fn candidates(pool: Vec<Question>, excluded: &HashSet<i64>) -> Vec<Question> {
    pool.into_iter()
        .filter(|q| !excluded.contains(&q.id))
        .collect()
}

/// Pick one not-yet-asked question uniformly at random.
pub fn next_question<S, R>(store: &S, request: &QuizRequest, rng: &mut R) -> Result<Option<Question>>
where
    S: QuestionStore + ?Sized,
    R: Rng + ?Sized,
{
    let pool = resolve_pool(store, request.scope)?;
    let pool_size = pool.len();
    let mut remaining = candidates(pool, &request.previous_question_ids);

    if remaining.is_empty() {
        debug!(
            scope = ?request.scope,
            pool_size,
            asked = request.previous_question_ids.len(),
            "Quiz pool exhausted"
        );
        return Ok(None);
    }

    let index = rng.gen_range(0..remaining.len());
    let picked = remaining.swap_remove(index);

    debug!(
        scope = ?request.scope,
        pool_size,
        candidates = remaining.len() + 1,
        question_id = picked.id,
        "Selected quiz question"
    );

    Ok(Some(picked))
}
