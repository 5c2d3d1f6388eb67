//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - categories(id, type)
//! - questions(id, question, answer, category, difficulty)
//!
//! The query layer only talks to storage through `TriviaStore`, so any
//! backend that can list, insert and delete rows can serve the API.

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};

use crate::Result;
use crate::model::{Category, CategoryId, NewQuestion, Question, QuestionId};

/// Filter applied when listing questions. Results are always ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Only questions in this category
    pub category: Option<CategoryId>,
    /// Only questions whose text contains this term, ignoring case
    pub search: Option<String>,
}

impl QuestionFilter {
    /// Match every question
    pub fn all() -> Self {
        Self::default()
    }

    pub fn in_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matching(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// Storage capabilities the catalog and quiz operations depend on.
pub trait TriviaStore {
    /// All categories ordered by id
    fn categories(&self) -> Result<Vec<Category>>;

    /// A single category, if it exists
    fn find_category(&self, id: CategoryId) -> Result<Option<Category>>;

    /// All questions matching `filter`, ordered by id
    fn questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>>;

    /// Number of stored questions across all categories
    fn count_questions(&self) -> Result<usize>;

    /// A single question, if it exists
    fn find_question(&self, id: QuestionId) -> Result<Option<Question>>;

    /// Persist a question and return it with its assigned id
    fn insert_question(&self, question: &NewQuestion) -> Result<Question>;

    /// Delete a question. Returns `false` when no row had that id.
    fn delete_question(&self, id: QuestionId) -> Result<bool>;
}
