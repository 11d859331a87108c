//! API route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use tracing::{debug, info};

use trivia_core::{category_map, parse_page, FormattedQuestion, QuizRequest};

use crate::error::{ApiError, Result};
use crate::models::{
    CategoriesQuery, CategoriesResponse, CategoryCreatedResponse, CreateCategoryRequest,
    DeleteQuestionResponse, PageQuery, QuestionCreatedResponse, QuestionPageResponse,
    QuestionsBody, QuestionsRequest, QuestionsResponse, QuizResponse,
};
use crate::state::AppState;

/// Unwrap a JSON body, turning any extractor rejection into a 400.
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Parse an integer path segment. Anything else cannot name a resource.
fn path_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("no resource with id '{}'", raw)))
}

/// GET /categories - List categories keyed by id.
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoriesQuery>,
) -> Result<Json<CategoriesResponse>> {
    let categories = state.engine.list_categories(query.quiz_only())?;

    Ok(Json(CategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories: category_map(&categories),
    }))
}

/// POST /categories - Create a category.
pub async fn create_category(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryCreatedResponse>> {
    let req = json_body(payload)?;
    let label = req
        .category
        .ok_or_else(|| ApiError::BadRequest("missing category".to_string()))?;

    let category = state.engine.create_category(&label)?;

    Ok(Json(CategoryCreatedResponse {
        success: true,
        category,
    }))
}

/// GET /questions - One page of all questions.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuestionsResponse>> {
    let page = parse_page(query.page.as_deref())?;
    let list = state.engine.list_questions(page)?;
    let categories = state.engine.list_categories(false)?;

    Ok(Json(QuestionsResponse {
        success: true,
        page: list,
        categories: category_map(&categories),
    }))
}

/// POST /questions - Search questions or create one, depending on the body.
pub async fn post_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    payload: std::result::Result<Json<QuestionsBody>, JsonRejection>,
) -> Result<Response> {
    match json_body(payload)?.classify()? {
        QuestionsRequest::Search { term } => {
            let page = parse_page(query.page.as_deref())?;
            let list = state.engine.search_questions(&term, page)?;
            debug!(page, total = list.total_questions, "Search complete");

            Ok(Json(QuestionPageResponse {
                success: true,
                page: list,
            })
            .into_response())
        }
        QuestionsRequest::Create(new_question) => {
            let created = state.engine.create_question(new_question)?;

            Ok(Json(QuestionCreatedResponse {
                success: true,
                created: created.id,
                question: FormattedQuestion::from(created),
            })
            .into_response())
        }
        QuestionsRequest::Empty => Err(ApiError::BadRequest(
            "expected a search term or question fields".to_string(),
        )),
    }
}

/// DELETE /questions/{id} - Delete a question.
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteQuestionResponse>> {
    let id = path_id(&id)?;
    let remaining = state.engine.delete_question(id)?;

    Ok(Json(DeleteQuestionResponse {
        success: true,
        deleted: id,
        total_questions: remaining,
    }))
}

/// GET /categories/{id}/questions - One page of a category's questions.
pub async fn questions_by_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuestionPageResponse>> {
    let category_id = path_id(&id)?;
    let page = parse_page(query.page.as_deref())?;
    let list = state.engine.questions_by_category(category_id, page)?;

    Ok(Json(QuestionPageResponse {
        success: true,
        page: list,
    }))
}

/// POST /quizzes - Next not-yet-asked question, or null when exhausted.
pub async fn next_quiz_question(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<QuizResponse>> {
    let request = QuizRequest::from_json(&json_body(payload)?)?;
    let quiz = state.engine.next_question(&request)?;

    match &quiz.question {
        Some(question) => info!(
            question_id = question.id,
            asked = request.previous_question_ids.len(),
            "Serving quiz question"
        ),
        None => info!(
            asked = request.previous_question_ids.len(),
            "Quiz finished, no questions left"
        ),
    }

    Ok(Json(QuizResponse {
        success: true,
        quiz,
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("no such route".to_string())
}
