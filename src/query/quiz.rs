//! Quiz question selection
//!
//! A quiz session is tracked by the caller: each request carries the ids
//! already shown, and the selector picks one of the remaining questions
//! uniformly at random. Nothing is recorded between calls.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::model::{lenient, CategoryId, Question, QuestionId};
use crate::storage::{QuestionFilter, TriviaStore};

/// Category id meaning "questions from every category"
pub const ALL_CATEGORIES: CategoryId = 0;

/// Category a quiz is played in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    #[serde(deserialize_with = "lenient::int")]
    pub id: CategoryId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl QuizCategory {
    pub fn is_all(&self) -> bool {
        self.id == ALL_CATEGORIES
    }
}

/// Body of a next-question request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<QuestionId>,
    pub quiz_category: QuizCategory,
}

impl QuizRequest {
    /// Filter selecting the candidate questions for this quiz
    pub fn filter(&self) -> QuestionFilter {
        if self.quiz_category.is_all() {
            QuestionFilter::all()
        } else {
            QuestionFilter::all().in_category(self.quiz_category.id)
        }
    }
}

/// Outcome of asking for the next quiz question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    /// A question not yet asked in this session
    Question(Question),
    /// Every candidate has been asked
    Exhausted,
}

impl QuizOutcome {
    pub fn question(&self) -> Option<&Question> {
        match self {
            QuizOutcome::Question(q) => Some(q),
            QuizOutcome::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, QuizOutcome::Exhausted)
    }
}

/// Pick one candidate whose id is not in `previous`, uniformly at random
pub fn select_question<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &HashSet<QuestionId>,
    rng: &mut R,
) -> QuizOutcome {
    let remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    match remaining.choose(rng) {
        Some(question) => QuizOutcome::Question(question.clone()),
        None => QuizOutcome::Exhausted,
    }
}

/// Load the quiz's candidates from `store` and pick the next question
pub fn next_question<S, R>(store: &S, request: &QuizRequest, rng: &mut R) -> Result<QuizOutcome>
where
    S: TriviaStore + ?Sized,
    R: Rng + ?Sized,
{
    let candidates = store.questions(&request.filter())?;
    let previous: HashSet<QuestionId> = request.previous_questions.iter().copied().collect();
    debug!(
        "Quiz in category {}: {} candidates, {} already asked",
        request.quiz_category.id,
        candidates.len(),
        previous.len()
    );

    Ok(select_question(candidates, &previous, rng))
}
