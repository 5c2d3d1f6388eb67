//! Seed files - bulk-load categories and questions from JSON
//!
//! ```json
//! {
//!   "categories": [{"type": "Science"}, {"type": "Art"}],
//!   "questions": [
//!     {"question": "What is H2O?", "answer": "Water", "category": 1, "difficulty": 1}
//!   ]
//! }
//! ```
//!
//! When the file lists categories, a question's `category` is the 1-based
//! position of its category in that list and is rewritten to the id the
//! database assigns on insert. A file without categories refers to categories
//! already in the database by id.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Error, Result};
use crate::model::{CategoryId, CreateQuestionRequest, NewQuestion};
use crate::storage::{SqliteStore, TriviaStore};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedCategory {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub questions: Vec<CreateQuestionRequest>,
}

/// Counts of rows written by `apply_seed`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub questions: usize,
}

pub fn load_seed(path: &Path) -> Result<SeedFile> {
    let contents = std::fs::read_to_string(path)?;
    let seed = serde_json::from_str(&contents)?;
    Ok(seed)
}

/// Insert everything in `seed` inside one transaction.
///
/// Every question is validated before anything is written; one invalid
/// question rejects the whole file.
pub fn apply_seed(store: &mut SqliteStore, seed: SeedFile) -> Result<SeedSummary> {
    let questions = seed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            q.validate()
                .map_err(|e| Error::Validation(format!("question #{}: {}", i + 1, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    if !seed.categories.is_empty() {
        let count = seed.categories.len();
        for (i, question) in questions.iter().enumerate() {
            if category_index(question.category, count).is_none() {
                return Err(Error::Validation(format!(
                    "question #{}: category {} is not one of the {} categories in the file",
                    i + 1,
                    question.category,
                    count
                )));
            }
        }
    }

    store.begin_transaction()?;
    let written = insert_all(store, &seed.categories, &questions);
    match written {
        Ok(summary) => {
            store.commit()?;
            info!("Seeded {} categories and {} questions", summary.categories, summary.questions);
            Ok(summary)
        }
        Err(e) => {
            store.rollback()?;
            Err(e)
        }
    }
}

fn insert_all(
    store: &SqliteStore,
    categories: &[SeedCategory],
    questions: &[NewQuestion],
) -> Result<SeedSummary> {
    let ids = categories
        .iter()
        .map(|category| store.insert_category(&category.kind).map(|c| c.id))
        .collect::<Result<Vec<_>>>()?;

    for question in questions {
        let category = if ids.is_empty() {
            question.category
        } else {
            category_index(question.category, ids.len())
                .map(|i| ids[i])
                .ok_or_else(|| Error::Validation(format!("unknown category {}", question.category)))?
        };
        store.insert_question(&NewQuestion { category, ..question.clone() })?;
    }
    Ok(SeedSummary {
        categories: categories.len(),
        questions: questions.len(),
    })
}

/// Index into the file's category list for a 1-based position
fn category_index(position: CategoryId, count: usize) -> Option<usize> {
    usize::try_from(position)
        .ok()
        .filter(|&p| (1..=count).contains(&p))
        .map(|p| p - 1)
}
