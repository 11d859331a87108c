//! API request and response models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trivia_core::{Category, FormattedQuestion, NewQuestion, QuestionList, QuizQuestion};

use crate::error::{ApiError, Result};

/// Query parameters carrying a page number.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Raw page value; parsed by the engine so bad input maps to 400.
    pub page: Option<String>,
}

/// Query parameters for GET /categories.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    /// Only list categories that have questions.
    pub quiz: Option<String>,
}

impl CategoriesQuery {
    pub fn quiz_only(&self) -> bool {
        matches!(
            self.quiz.as_deref().map(str::trim),
            Some("true") | Some("1") | Some("yes")
        )
    }
}

/// Request body for POST /categories.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub category: Option<String>,
}

/// A numeric field that clients send either as a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Text(String),
}

impl IntOrString {
    fn to_i64(&self, field: &str) -> Result<i64> {
        match self {
            IntOrString::Int(n) => Ok(*n),
            IntOrString::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ApiError::BadRequest(format!("{} must be an integer", field))),
        }
    }
}

/// Request body for POST /questions, before classification.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionsBody {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<IntOrString>,
    pub difficulty: Option<IntOrString>,
}

/// What a POST /questions body asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum QuestionsRequest {
    Search { term: String },
    Create(NewQuestion),
    Empty,
}

impl QuestionsBody {
    /// Decide which operation the body describes.
    ///
    /// A search term wins over question fields. Partially filled question
    /// fields are a bad request.
    pub fn classify(self) -> Result<QuestionsRequest> {
        if let Some(term) = self.search_term {
            return Ok(QuestionsRequest::Search { term });
        }

        match (self.question, self.answer, self.category, self.difficulty) {
            (None, None, None, None) => Ok(QuestionsRequest::Empty),
            (Some(text), Some(answer), Some(category), Some(difficulty)) => {
                Ok(QuestionsRequest::Create(NewQuestion {
                    text,
                    answer,
                    category_id: category.to_i64("category")?,
                    difficulty: difficulty.to_i64("difficulty")?,
                }))
            }
            _ => Err(ApiError::BadRequest(
                "question, answer, category and difficulty are all required".to_string(),
            )),
        }
    }
}

/// Response body for GET /categories.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<i64, String>,
    pub total_categories: usize,
}

/// Response body for POST /categories.
#[derive(Debug, Serialize)]
pub struct CategoryCreatedResponse {
    pub success: bool,
    pub category: Category,
}

/// Response body for GET /questions.
#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub page: QuestionList,
    pub categories: BTreeMap<i64, String>,
}

/// Response body for search results and category listings.
#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    #[serde(flatten)]
    pub page: QuestionList,
}

/// Response body for a created question.
#[derive(Debug, Serialize)]
pub struct QuestionCreatedResponse {
    pub success: bool,
    pub created: i64,
    pub question: FormattedQuestion,
}

/// Response body for DELETE /questions/{id}.
#[derive(Debug, Serialize)]
pub struct DeleteQuestionResponse {
    pub success: bool,
    pub deleted: i64,
    pub total_questions: i64,
}

/// Response body for POST /quizzes.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(flatten)]
    pub quiz: QuizQuestion,
}
