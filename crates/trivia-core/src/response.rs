//! Uniform result shapes for listings and quiz play.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Category, Question};

/// Label reported when no category filter was applied.
pub const ALL_CATEGORIES_LABEL: &str = "All";

/// A question as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedQuestion {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl From<&Question> for FormattedQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: q.text.clone(),
            answer: q.answer.clone(),
            category: q.category_id,
            difficulty: q.difficulty,
        }
    }
}

impl From<Question> for FormattedQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.text,
            answer: q.answer,
            category: q.category_id,
            difficulty: q.difficulty,
        }
    }
}

/// One page of questions.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionList {
    pub questions: Vec<FormattedQuestion>,
    /// Size of the whole (filtered) collection, not of this page.
    pub total_questions: usize,
    pub current_category: String,
}

/// The next quiz question, or `None` when the pool is exhausted.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub question: Option<FormattedQuestion>,
}

pub fn assemble_list(items: &[Question], total: usize, category: Option<&Category>) -> QuestionList {
    QuestionList {
        questions: items.iter().map(FormattedQuestion::from).collect(),
        total_questions: total,
        current_category: category
            .map(|c| c.label.clone())
            .unwrap_or_else(|| ALL_CATEGORIES_LABEL.to_string()),
    }
}

pub fn assemble_single(question: Option<Question>) -> QuizQuestion {
    QuizQuestion {
        question: question.map(FormattedQuestion::from),
    }
}

/// Categories keyed by id, the shape clients use for lookups.
pub fn category_map(categories: &[Category]) -> BTreeMap<i64, String> {
    categories
        .iter()
        .map(|c| (c.id, c.label.clone()))
        .collect()
}
