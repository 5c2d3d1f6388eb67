//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::Result;
use crate::model::{Category, CategoryId, NewQuestion, Question, QuestionId};
use super::{schema, QuestionFilter, TriviaStore};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// SQLite-backed storage for categories and questions
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Category Operations ==========

    /// Insert a category and return it with its assigned id
    pub fn insert_category(&self, kind: &str) -> Result<Category> {
        self.conn.execute("INSERT INTO categories (type) VALUES (?1)", [kind])?;
        Ok(Category {
            id: self.conn.last_insert_rowid(),
            kind: kind.to_string(),
        })
    }

    /// Count all categories
    pub fn count_categories(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Every category with the number of questions filed under it, ordered by id
    pub fn question_counts_by_category(&self) -> Result<Vec<(Category, usize)>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.id, c.type, COUNT(q.id)
            FROM categories c
            LEFT JOIN questions q ON q.category = c.id
            GROUP BY c.id, c.type
            ORDER BY c.id
            "#,
        )?;

        let counts = stmt
            .query_map([], |row| {
                let category = self.row_to_category(row)?;
                let count: i64 = row.get(2)?;
                Ok((category, count as usize))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(counts)
    }

    /// Helper to convert a row to a Category
    fn row_to_category(&self, row: &rusqlite::Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            kind: row.get(1)?,
        })
    }

    /// Helper to convert a row to a Question
    fn row_to_question(&self, row: &rusqlite::Row) -> rusqlite::Result<Question> {
        Ok(Question {
            id: row.get(0)?,
            question: row.get(1)?,
            answer: row.get(2)?,
            category: row.get(3)?,
            difficulty: row.get(4)?,
        })
    }

    // ========== Bulk Operations ==========

    /// Begin a transaction for bulk operations
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.conn.execute("BEGIN TRANSACTION", [])?;
        Ok(())
    }

    /// Commit a transaction
    pub fn commit(&mut self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }

    /// Rollback a transaction
    pub fn rollback(&mut self) -> Result<()> {
        self.conn.execute("ROLLBACK", [])?;
        Ok(())
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            categories: self.count_categories()?,
            questions: self.count_questions()?,
        })
    }
}

impl TriviaStore for SqliteStore {
    fn categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare("SELECT id, type FROM categories ORDER BY id")?;

        let categories = stmt
            .query_map([], |row| self.row_to_category(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(categories)
    }

    fn find_category(&self, id: CategoryId) -> Result<Option<Category>> {
        self.conn
            .query_row(
                "SELECT id, type FROM categories WHERE id = ?1",
                [id],
                |row| self.row_to_category(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// The category filter runs in SQL; the search term is matched in Rust
    /// so that case folding covers non-ASCII letters.
    fn questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE (?1 IS NULL OR category = ?1) ORDER BY id"
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let questions = stmt
            .query_map([filter.category], |row| self.row_to_question(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let questions = match filter.search.as_deref() {
            Some(term) => {
                let needle = term.to_lowercase();
                questions
                    .into_iter()
                    .filter(|q| q.question.to_lowercase().contains(&needle))
                    .collect()
            }
            None => questions,
        };

        Ok(questions)
    }

    fn count_questions(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn find_question(&self, id: QuestionId) -> Result<Option<Question>> {
        self.conn
            .query_row(
                &format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?1"),
                [id],
                |row| self.row_to_question(row),
            )
            .optional()
            .map_err(Into::into)
    }

    fn insert_question(&self, question: &NewQuestion) -> Result<Question> {
        self.conn.execute(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                question.question,
                question.answer,
                question.category,
                question.difficulty,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(question.clone().with_id(id))
    }

    fn delete_question(&self, id: QuestionId) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM questions WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DbStats {
    pub categories: usize,
    pub questions: usize,
}
