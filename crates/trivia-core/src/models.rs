//! Domain models shared by the engine and its store.

use serde::{Deserialize, Serialize};

/// Lowest allowed question difficulty.
pub const MIN_DIFFICULTY: i64 = 1;

/// Highest allowed question difficulty.
pub const MAX_DIFFICULTY: i64 = 5;

/// A trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier.
    pub id: i64,
    /// Question text shown to the player.
    pub text: String,
    /// Expected answer.
    pub answer: String,
    /// Owning category.
    pub category_id: i64,
    /// Difficulty in `MIN_DIFFICULTY..=MAX_DIFFICULTY`.
    pub difficulty: i64,
}

/// A question category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: i64,
    /// Unique display label.
    #[serde(rename = "type")]
    pub label: String,
}

/// Parameters for creating a new question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    pub answer: String,
    pub category_id: i64,
    pub difficulty: i64,
}

impl NewQuestion {
    /// Convenience constructor.
    pub fn new(
        text: impl Into<String>,
        answer: impl Into<String>,
        category_id: i64,
        difficulty: i64,
    ) -> Self {
        Self {
            text: text.into(),
            answer: answer.into(),
            category_id,
            difficulty,
        }
    }
}
