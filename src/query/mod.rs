//! Query layer - the operations behind each API route
//!
//! - `catalog`: category listing, paginated/searchable question views, create and delete
//! - `quiz`: random next-question selection for a quiz session
//! - `page`: fixed-size pagination shared by every question view

pub mod catalog;
pub mod page;
pub mod quiz;

pub use catalog::CatalogService;
pub use page::{Page, QUESTIONS_PER_PAGE};
pub use quiz::{QuizCategory, QuizOutcome, QuizRequest};
