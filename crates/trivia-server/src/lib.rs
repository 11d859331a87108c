//! Trivia Server - HTTP API server.
//!
//! This crate exposes the trivia engine over JSON. Every route lives under a
//! versioned prefix (`/api/v0.1.0` by default).
//!
//! ## Endpoints
//!
//! - `GET /categories` - List categories (`?quiz=true` for playable ones only)
//! - `POST /categories` - Create a category
//! - `GET /questions?page=N` - Page through all questions
//! - `POST /questions` - Search by `searchTerm`, or create a question
//! - `DELETE /questions/{id}` - Delete a question
//! - `GET /categories/{id}/questions?page=N` - Page through one category
//! - `POST /quizzes` - Next question not yet asked in this quiz
//!
//! ## Example
//!
//! ```no_run
//! use trivia_server::{Server, ServerConfig};
//! use trivia_storage::StorageConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::new(ServerConfig::default(), &StorageConfig::in_memory()).unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

pub mod error;
mod handlers;
pub mod models;
pub mod state;

use std::net::SocketAddr;

use axum::routing::{delete, get, post};
use axum::Router;
use socket2::{Domain, Protocol, Socket, Type};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use trivia_core::DEFAULT_PAGE_SIZE;
use trivia_storage::{Database, StorageConfig};

pub use error::{ApiError, Result};
pub use state::AppState;

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default server host (localhost only).
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default versioned route prefix.
pub const DEFAULT_API_PREFIX: &str = "/api/v0.1.0";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: 127.0.0.1).
    pub host: String,
    /// Port to bind to (default: 5000).
    pub port: u16,
    /// Prefix every route is mounted under.
    pub api_prefix: String,
    /// Questions per page.
    pub page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ServerConfig {
    /// Sets the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the route prefix.
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Server error types.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("failed to bind to {0}: {1}")]
    BindError(SocketAddr, std::io::Error),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] trivia_storage::StorageError),

    /// Server runtime error.
    #[error("server error: {0}")]
    Runtime(String),
}

/// The HTTP API server.
pub struct Server {
    router: Router,
    addr: SocketAddr,
}

impl Server {
    /// Creates a new server, opening the database the storage config names.
    pub fn new(
        config: ServerConfig,
        storage: &StorageConfig,
    ) -> std::result::Result<Self, ServerError> {
        let db = Database::open(storage)?;
        Self::with_database(config, db)
    }

    /// Creates a server with an existing database.
    pub fn with_database(
        config: ServerConfig,
        db: Database,
    ) -> std::result::Result<Self, ServerError> {
        if config.page_size == 0 {
            return Err(ServerError::Runtime("page size must be positive".to_string()));
        }
        let state = AppState::with_page_size(db, config.page_size);
        Self::with_state(config, state)
    }

    /// Creates a server with custom application state.
    pub fn with_state(
        config: ServerConfig,
        state: AppState,
    ) -> std::result::Result<Self, ServerError> {
        let router = build_router(state, &config.api_prefix);

        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| ServerError::Runtime(format!("invalid address: {}", e)))?;

        Ok(Self { router, addr })
    }

    /// Returns the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Runs the server until shutdown.
    pub async fn run(self) -> std::result::Result<(), ServerError> {
        info!("Starting Trivia API server on {}", self.addr);

        let domain = if self.addr.is_ipv6() {
            Domain::IPV6
        } else {
            Domain::IPV4
        };

        let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        // Lets a restarted server reclaim a port still in TIME_WAIT
        socket
            .set_reuse_address(true)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        socket
            .bind(&self.addr.into())
            .map_err(|e| ServerError::BindError(self.addr, e))?;
        socket
            .listen(128)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        // Required before handing the socket to tokio
        socket
            .set_nonblocking(true)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        let std_listener: std::net::TcpListener = socket.into();
        let listener = tokio::net::TcpListener::from_std(std_listener)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        axum::serve(listener, self.router)
            .await
            .map_err(|e| ServerError::Runtime(e.to_string()))?;

        Ok(())
    }

    /// Returns the router for testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the API router mounted under `prefix`.
///
/// An empty prefix (or `/`) mounts the routes at the root.
pub fn build_router(state: AppState, prefix: &str) -> Router {
    // Browser frontends are served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/{id}/questions",
            get(handlers::questions_by_category),
        )
        .route(
            "/questions",
            get(handlers::list_questions).post(handlers::post_questions),
        )
        .route("/questions/{id}", delete(handlers::delete_question))
        .route("/quizzes", post(handlers::next_quiz_question));

    let prefix = prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        Router::new().merge(api)
    } else if prefix.starts_with('/') {
        Router::new().nest(prefix, api)
    } else {
        Router::new().nest(&format!("/{}", prefix), api)
    };

    router
        .fallback(handlers::not_found)
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use trivia_core::NewQuestion;

    const PREFIX: &str = "/api/v0.1.0";

    /// 19 questions spread over the six stock categories.
    fn seeded_state() -> AppState {
        let state = AppState::in_memory().unwrap();
        for n in 1..=19 {
            let category = ((n - 1) % 6) + 1;
            let question = NewQuestion::new(
                format!("Question number {}", n),
                format!("Answer {}", n),
                category,
                (n % 5) + 1,
            );
            state.db().insert_question(&question).unwrap();
        }
        state
    }

    fn create_test_app() -> Router {
        build_router(seeded_state(), PREFIX)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(format!("{}{}", PREFIX, uri));

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    fn assert_error(status: StatusCode, json: &Value, expected: StatusCode, message: &str) {
        assert_eq!(status, expected);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], expected.as_u16());
        assert_eq!(json["message"], message);
    }

    #[tokio::test]
    async fn test_list_categories() {
        let (status, json) = send(create_test_app(), "GET", "/categories", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["total_categories"], 6);
        assert_eq!(json["categories"]["1"], "Science");
        assert_eq!(json["categories"]["6"], "Sports");
    }

    #[tokio::test]
    async fn test_list_categories_for_quiz_skips_empty_ones() {
        let state = seeded_state();
        state.db().insert_category("Music").unwrap();
        let app = build_router(state, PREFIX);

        let (_, all) = send(app.clone(), "GET", "/categories", None).await;
        assert_eq!(all["total_categories"], 7);

        let (status, quiz) = send(app, "GET", "/categories?quiz=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(quiz["total_categories"], 6);
        assert!(quiz["categories"].get("7").is_none());
    }

    #[tokio::test]
    async fn test_create_category() {
        let app = create_test_app();

        let (status, json) = send(
            app.clone(),
            "POST",
            "/categories",
            Some(json!({"category": "  Music "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["category"]["id"], 7);
        assert_eq!(json["category"]["type"], "Music");

        let (status, json) = send(app, "POST", "/categories", Some(json!({"category": "Music"}))).await;
        assert_error(status, &json, StatusCode::FORBIDDEN, "forbidden");
    }

    #[tokio::test]
    async fn test_create_category_bad_request() {
        let app = create_test_app();

        let (status, json) = send(app.clone(), "POST", "/categories", Some(json!({}))).await;
        assert_error(status, &json, StatusCode::BAD_REQUEST, "bad request");

        let (status, json) =
            send(app.clone(), "POST", "/categories", Some(json!({"category": "   "}))).await;
        assert_error(status, &json, StatusCode::BAD_REQUEST, "bad request");

        let (status, json) = send(app, "POST", "/categories", None).await;
        assert_error(status, &json, StatusCode::BAD_REQUEST, "bad request");
    }

    #[tokio::test]
    async fn test_list_questions_pages() {
        let app = create_test_app();

        let (status, json) = send(app.clone(), "GET", "/questions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["total_questions"], 19);
        assert_eq!(json["current_category"], "All");
        assert_eq!(json["questions"].as_array().unwrap().len(), 10);
        assert_eq!(json["questions"][0]["id"], 1);
        assert_eq!(json["categories"]["2"], "Art");

        let (status, json) = send(app, "GET", "/questions?page=2", None).await;
        assert_eq!(status, StatusCode::OK);
        let questions = json["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 9);
        assert_eq!(questions[0]["id"], 11);
        assert_eq!(questions[8]["id"], 19);
    }

    #[tokio::test]
    async fn test_list_questions_bad_page() {
        let app = create_test_app();

        let (status, json) = send(app.clone(), "GET", "/questions?page=1000", None).await;
        assert_error(status, &json, StatusCode::NOT_FOUND, "resource not found");

        let (status, json) = send(app.clone(), "GET", "/questions?page=0", None).await;
        assert_error(status, &json, StatusCode::NOT_FOUND, "resource not found");

        let (status, json) = send(app, "GET", "/questions?page=abc", None).await;
        assert_error(status, &json, StatusCode::BAD_REQUEST, "bad request");
    }

    #[tokio::test]
    async fn test_list_questions_empty_database() {
        let app = build_router(AppState::in_memory().unwrap(), PREFIX);

        let (status, json) = send(app, "GET", "/questions", None).await;
        assert_error(status, &json, StatusCode::NOT_FOUND, "resource not found");
    }

    #[tokio::test]
    async fn test_delete_question() {
        let app = create_test_app();

        let (status, json) = send(app.clone(), "DELETE", "/questions/5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["deleted"], 5);
        assert_eq!(json["total_questions"], 18);

        let (status, json) = send(app, "DELETE", "/questions/5", None).await;
        assert_error(status, &json, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
    }

    #[tokio::test]
    async fn test_delete_unknown_question() {
        let (status, json) = send(create_test_app(), "DELETE", "/questions/1000", None).await;
        assert_error(status, &json, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
    }

    #[tokio::test]
    async fn test_search_questions() {
        let app = create_test_app();

        let (status, json) = send(
            app,
            "POST",
            "/questions",
            Some(json!({"searchTerm": "NUMBER 1"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        // 1 and 10 through 19
        assert_eq!(json["total_questions"], 11);
        assert_eq!(json["current_category"], "All");
        assert_eq!(json["questions"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_search_second_page() {
        let (status, json) = send(
            create_test_app(),
            "POST",
            "/questions?page=2",
            Some(json!({"searchTerm": "number 1"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["questions"].as_array().unwrap().len(), 1);
        assert_eq!(json["questions"][0]["id"], 19);
    }

    #[tokio::test]
    async fn test_search_errors() {
        let app = create_test_app();

        let (status, json) =
            send(app.clone(), "POST", "/questions", Some(json!({"searchTerm": "   "}))).await;
        assert_error(status, &json, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");

        let (status, json) = send(
            app,
            "POST",
            "/questions",
            Some(json!({"searchTerm": "no such question"})),
        )
        .await;
        assert_error(status, &json, StatusCode::NOT_FOUND, "resource not found");
    }

    #[tokio::test]
    async fn test_create_question() {
        let app = create_test_app();

        let (status, json) = send(
            app.clone(),
            "POST",
            "/questions",
            Some(json!({
                "question": "What is the heaviest organ in the human body?",
                "answer": "The liver",
                "category": "1",
                "difficulty": 4
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["created"], 20);
        assert_eq!(json["question"]["answer"], "The liver");
        assert_eq!(json["question"]["category"], 1);
        assert_eq!(json["question"]["difficulty"], 4);

        let (_, json) = send(app, "GET", "/questions?page=2", None).await;
        assert_eq!(json["total_questions"], 20);
    }

    #[tokio::test]
    async fn test_create_question_errors() {
        let app = create_test_app();

        let blank = json!({"question": "  ", "answer": "a", "category": 1, "difficulty": 1});
        let (status, json) = send(app.clone(), "POST", "/questions", Some(blank)).await;
        assert_error(status, &json, StatusCode::BAD_REQUEST, "bad request");

        let partial = json!({"question": "q", "answer": "a"});
        let (status, json) = send(app.clone(), "POST", "/questions", Some(partial)).await;
        assert_error(status, &json, StatusCode::BAD_REQUEST, "bad request");

        let (status, json) = send(app.clone(), "POST", "/questions", Some(json!({}))).await;
        assert_error(status, &json, StatusCode::BAD_REQUEST, "bad request");

        let hard = json!({"question": "q", "answer": "a", "category": 1, "difficulty": 9});
        let (status, json) = send(app.clone(), "POST", "/questions", Some(hard)).await;
        assert_error(status, &json, StatusCode::BAD_REQUEST, "bad request");

        let orphan = json!({"question": "q", "answer": "a", "category": 99, "difficulty": 1});
        let (status, json) = send(app, "POST", "/questions", Some(orphan)).await;
        assert_error(status, &json, StatusCode::NOT_FOUND, "resource not found");
    }

    #[tokio::test]
    async fn test_questions_by_category() {
        let (status, json) = send(create_test_app(), "GET", "/categories/2/questions", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["current_category"], "Art");
        // 2, 8, 14
        assert_eq!(json["total_questions"], 3);
        let ids: Vec<i64> = json["questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 8, 14]);
    }

    #[tokio::test]
    async fn test_questions_by_unknown_category() {
        let app = create_test_app();

        let (status, json) = send(app.clone(), "GET", "/categories/1000/questions", None).await;
        assert_error(status, &json, StatusCode::NOT_FOUND, "resource not found");

        let (status, json) = send(app, "GET", "/categories/art/questions", None).await;
        assert_error(status, &json, StatusCode::NOT_FOUND, "resource not found");
    }

    #[tokio::test]
    async fn test_quiz_returns_unasked_question() {
        let (status, json) = send(
            create_test_app(),
            "POST",
            "/quizzes",
            Some(json!({
                "previous_questions": [1, 7],
                "quiz_category": {"type": "Science", "id": "1"}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        let question = &json["question"];
        assert_eq!(question["category"], 1);
        let id = question["id"].as_i64().unwrap();
        assert!([13, 19].contains(&id));
    }

    #[tokio::test]
    async fn test_quiz_any_category() {
        let (status, json) = send(
            create_test_app(),
            "POST",
            "/quizzes",
            Some(json!({
                "previous_questions": [],
                "quiz_category": {"type": "click", "id": 0}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let id = json["question"]["id"].as_i64().unwrap();
        assert!((1..=19).contains(&id));
    }

    #[tokio::test]
    async fn test_quiz_exhausted() {
        let (status, json) = send(
            create_test_app(),
            "POST",
            "/quizzes",
            Some(json!({
                "previous_questions": [2, 8, 14],
                "quiz_category": {"id": 2}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert!(json["question"].is_null());
    }

    #[tokio::test]
    async fn test_quiz_errors() {
        let app = create_test_app();

        let (status, json) = send(
            app.clone(),
            "POST",
            "/quizzes",
            Some(json!({"previous_questions": [], "quiz_category": {"id": 1000}})),
        )
        .await;
        assert_error(status, &json, StatusCode::NOT_FOUND, "resource not found");

        let (status, json) = send(
            app.clone(),
            "POST",
            "/quizzes",
            Some(json!({"quiz_category": {"id": 1}})),
        )
        .await;
        assert_error(status, &json, StatusCode::BAD_REQUEST, "bad request");

        let (status, json) = send(app, "POST", "/quizzes", None).await;
        assert_error(status, &json, StatusCode::BAD_REQUEST, "bad request");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, json) = send(create_test_app(), "GET", "/nowhere", None).await;
        assert_error(status, &json, StatusCode::NOT_FOUND, "resource not found");
    }

    #[tokio::test]
    async fn test_root_prefix() {
        let app = build_router(seeded_state(), "/");

        let request = Request::builder()
            .method("GET")
            .uri("/categories")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_prefix, DEFAULT_API_PREFIX);
        assert_eq!(config.page_size, 10);

        let server = Server::with_state(
            config.with_host("0.0.0.0").with_port(8080),
            AppState::in_memory().unwrap(),
        )
        .unwrap();
        assert_eq!(server.addr().port(), 8080);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = Server::with_database(
            ServerConfig::default().with_page_size(0),
            Database::in_memory().unwrap(),
        );
        assert!(matches!(result, Err(ServerError::Runtime(_))));
    }
}
