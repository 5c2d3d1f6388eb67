//! Record types served by the API
//!
//! - `Question`: question and answer text, owning category and a difficulty score
//! - `Category`: an identifier and its type label ("Science", "Art", ...)
//!
//! Records are immutable once loaded. New questions enter through
//! `CreateQuestionRequest`, which must validate into a `NewQuestion`
//! before anything reaches storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Identifier of a stored question
pub type QuestionId = i64;

/// Identifier of a stored category
pub type CategoryId = i64;

/// Category identifier to type label, ordered by identifier.
///
/// Serializes as a JSON object keyed by the stringified identifier.
pub type CategoryMap = BTreeMap<CategoryId, String>;

/// A stored trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    /// Build the identifier -> label mapping for a list of categories
    pub fn to_map(categories: &[Category]) -> CategoryMap {
        categories
            .iter()
            .map(|c| (c.id, c.kind.clone()))
            .collect()
    }
}

/// A validated question ready to be persisted (identifier not yet assigned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

impl NewQuestion {
    /// Attach the identifier assigned by storage
    pub fn with_id(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Untrusted create-question input, as posted by a client or read from a seed file.
///
/// Every field is optional here so that a missing field becomes a
/// validation failure instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_int")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional_int")]
    pub difficulty: Option<i64>,
}

impl CreateQuestionRequest {
    /// Validate all four fields.
    ///
    /// Text must be non-blank; category and difficulty must be present and positive.
    pub fn validate(self) -> Result<NewQuestion> {
        let question = required_text("question", self.question)?;
        let answer = required_text("answer", self.answer)?;
        let category = required_positive("category", self.category)?;
        let difficulty = required_positive("difficulty", self.difficulty)?;

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::Validation(format!("`{}` is required", field))),
    }
}

fn required_positive(field: &str, value: Option<i64>) -> Result<i64> {
    match value {
        Some(n) if n > 0 => Ok(n),
        Some(n) => Err(Error::Validation(format!("`{}` must be positive, got {}", field, n))),
        None => Err(Error::Validation(format!("`{}` is required", field))),
    }
}

/// Integer fields that browsers frequently send as strings (`"2"`).
pub(crate) mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("expected an integer, got {:?}", s))),
        }
    }

    /// Like `int`, but `null` and `""` deserialize to `None`.
    pub fn optional_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected an integer, got {:?}", s))),
        }
    }
}
