//! # Trivia - question bank and quiz API
//!
//! Backs a trivia web application over a two-table schema (questions, categories).
//!
//! Trivia provides:
//! - Category listing and paginated, searchable question views
//! - Question creation and deletion
//! - A randomized quiz selector that never repeats a question within a session
//! - SQLite-backed storage behind the `TriviaStore` trait
//! - An axum HTTP server exposing the JSON API

pub mod model;
pub mod storage;
pub mod query;
pub mod server;
pub mod seed;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use model::{Category, CategoryId, CategoryMap, CreateQuestionRequest, NewQuestion, Question, QuestionId};
pub use query::{CatalogService, Page, QuizOutcome, QuizRequest, QUESTIONS_PER_PAGE};
pub use storage::{QuestionFilter, SqliteStore, TriviaStore};

/// Result type alias for Trivia operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Trivia operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("No such resource: {0}")]
    NoSuchResource(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The two failure kinds callers of the API can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unprocessable,
}

impl Error {
    /// Collapse the error into the kind reported to API clients.
    ///
    /// A missing category is reported as unprocessable: it is an invalid
    /// filter rather than a missing resource. Backend failures are not
    /// distinguished from bad input.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::QuestionNotFound(_) | Error::NoSuchResource(_) => ErrorKind::NotFound,
            Error::CategoryNotFound(_)
            | Error::Validation(_)
            | Error::Storage(_)
            | Error::Io(_)
            | Error::Json(_) => ErrorKind::Unprocessable,
        }
    }
}
