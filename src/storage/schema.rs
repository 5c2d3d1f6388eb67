//! Database schema definitions

/// SQL to create the categories table
pub const CREATE_CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type TEXT NOT NULL
)
"#;

/// SQL to create the questions table
///
/// `category` holds a `categories(id)` value without a foreign key, so a
/// question may name a category that does not exist.
/// AUTOINCREMENT keeps ids of deleted questions from being handed out again.
pub const CREATE_QUESTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    category INTEGER NOT NULL,
    difficulty INTEGER NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_CATEGORIES_TABLE,
        CREATE_QUESTIONS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
