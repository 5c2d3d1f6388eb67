use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use crate::storage::SqliteStore;
use crate::{Error, ErrorKind};

pub mod routes;

/// Server state
pub struct AppState {
    pub store: Mutex<SqliteStore>,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
        })
    }
}

/// Successful response body: `{"success": true, ...payload}`
#[derive(Serialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Success<T> {
    pub fn new(payload: T) -> Json<Self> {
        Json(Self { success: true, payload })
    }
}

/// Failed response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Not found",
            ErrorKind::Unprocessable => "unprocessable",
        }
    }
}

impl IntoResponse for ErrorKind {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Storage(e) => tracing::error!("Storage failure: {}", e),
            other => tracing::debug!("Request rejected: {}", other),
        }
        self.kind().into_response()
    }
}

/// Build the API router around `state`
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    Router::new()
        .route("/categories", get(routes::list_categories))
        .route("/categories/{category_id}/questions", get(routes::questions_by_category))
        .route("/questions", get(routes::list_questions).post(routes::create_question))
        .route("/questions/search", post(routes::search_questions))
        .route("/questions/{question_id}", get(routes::get_question).delete(routes::delete_question))
        .route("/quizzes", post(routes::next_quiz_question))
        .fallback(routes::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(addr: SocketAddr, store: SqliteStore) -> anyhow::Result<()> {
    let app = router(AppState::new(store));

    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
