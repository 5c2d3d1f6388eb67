//! Catalog query service
//!
//! Provides the read and write operations behind the question/category routes:
//! - Category listing
//! - Paginated question listing, optionally by category or search term
//! - Question creation and deletion
//!
//! Every question view is ordered by id and cut into pages of
//! `QUESTIONS_PER_PAGE`.

use serde::Serialize;
use tracing::{debug, info};

use crate::{Error, Result};
use crate::model::{Category, CategoryId, CategoryMap, CreateQuestionRequest, Question, QuestionId};
use crate::storage::{QuestionFilter, TriviaStore};
use super::page::Page;

/// All categories, keyed by id
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    pub categories: CategoryMap,
    pub total_categories: usize,
}

/// One page of the full question list
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
}

/// One page of search results; the total counts every match
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// One page of a category's questions.
///
/// `total_questions` is the number of questions across all categories,
/// not the number in this category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

/// Result of creating a question: its id plus a fresh page of all questions
#[derive(Debug, Clone, Serialize)]
pub struct CreatedQuestion {
    pub created: QuestionId,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// Catalog operations over a borrowed store
pub struct CatalogService<'a, S: TriviaStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: TriviaStore + ?Sized> CatalogService<'a, S> {
    /// Create a new catalog service
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// List every category
    pub fn list_categories(&self) -> Result<CategoryListing> {
        let categories = self.store.categories()?;
        debug!("Listing {} categories", categories.len());

        Ok(CategoryListing {
            total_categories: categories.len(),
            categories: Category::to_map(&categories),
        })
    }

    /// One page of all questions, with the full category mapping
    pub fn list_questions(&self, page: Page) -> Result<QuestionPage> {
        let questions = self.store.questions(&QuestionFilter::all())?;
        let total_questions = questions.len();
        let categories = self.store.categories()?;
        debug!("Listing page {} of {} questions", page.number(), total_questions);

        Ok(QuestionPage {
            questions: page.slice(questions),
            total_questions,
            categories: Category::to_map(&categories),
        })
    }

    /// One page of questions whose text contains `term`, ignoring case.
    ///
    /// A missing or empty term matches every question.
    pub fn search_questions(&self, term: Option<&str>, page: Page) -> Result<SearchResults> {
        let filter = match term {
            Some(term) if !term.is_empty() => QuestionFilter::all().matching(term),
            _ => QuestionFilter::all(),
        };
        let matches = self.store.questions(&filter)?;
        debug!("Search {:?} matched {} questions", term, matches.len());

        Ok(SearchResults {
            total_questions: matches.len(),
            questions: page.slice(matches),
        })
    }

    /// One page of a single category's questions
    pub fn questions_by_category(&self, category_id: CategoryId, page: Page) -> Result<CategoryQuestions> {
        let category = self
            .store
            .find_category(category_id)?
            .ok_or(Error::CategoryNotFound(category_id))?;

        let questions = self.store.questions(&QuestionFilter::all().in_category(category_id))?;
        let total_questions = self.store.count_questions()?;
        debug!("Category {} ({}) has {} questions", category.id, category.kind, questions.len());

        Ok(CategoryQuestions {
            questions: page.slice(questions),
            total_questions,
            current_category: category.kind,
        })
    }

    /// Fetch a single question
    pub fn get_question(&self, id: QuestionId) -> Result<Question> {
        self.store
            .find_question(id)?
            .ok_or(Error::QuestionNotFound(id))
    }

    /// Validate and persist a question, then return the requested page of all questions
    pub fn create_question(&self, request: CreateQuestionRequest, page: Page) -> Result<CreatedQuestion> {
        let new_question = request.validate()?;
        let question = self.store.insert_question(&new_question)?;
        info!("Created question {} in category {}", question.id, question.category);

        let questions = self.store.questions(&QuestionFilter::all())?;
        Ok(CreatedQuestion {
            created: question.id,
            total_questions: questions.len(),
            questions: page.slice(questions),
        })
    }

    /// Delete a question and return the record that was removed
    pub fn delete_question(&self, id: QuestionId) -> Result<Question> {
        let question = self.get_question(id)?;
        if !self.store.delete_question(id)? {
            return Err(Error::QuestionNotFound(id));
        }
        info!("Deleted question {}", id);
        Ok(question)
    }
}
