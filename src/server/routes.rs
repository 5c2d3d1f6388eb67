use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use crate::server::{AppState, Success};
use crate::query::{quiz, CatalogService, QuizRequest};
use crate::query::catalog::{CategoryListing, CategoryQuestions, CreatedQuestion, QuestionPage, SearchResults};
use crate::query::page::PageParams;
use crate::model::{CategoryId, CreateQuestionRequest, Question, QuestionId};
use crate::Error;
use std::sync::Arc;

type ApiResult<T> = Result<Json<Success<T>>, Error>;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

#[derive(Serialize)]
pub struct QuestionBody {
    pub question: Question,
}

/// Quiz response; `question` is left out once the quiz is exhausted
#[derive(Serialize)]
pub struct QuizBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

/// Bad `?page=` values fall back to the first page instead of failing
fn page_params(query: Result<Query<PageParams>, QueryRejection>) -> PageParams {
    query.map(|Query(params)| params).unwrap_or_default()
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Error> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| Error::Validation(rejection.body_text()))
}

/// Non-numeric ids in the path are treated as unknown resources
fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, Error> {
    path.map(|Path(id)| id)
        .map_err(|rejection| Error::NoSuchResource(rejection.body_text()))
}

pub async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<CategoryListing> {
    let store = state.store.lock().await;
    let listing = CatalogService::new(&*store).list_categories()?;
    Ok(Success::new(listing))
}

pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<QuestionPage> {
    let page = page_params(query).page();
    let store = state.store.lock().await;
    let questions = CatalogService::new(&*store).list_questions(page)?;
    Ok(Success::new(questions))
}

pub async fn get_question(
    State(state): State<Arc<AppState>>,
    path: Result<Path<QuestionId>, PathRejection>,
) -> ApiResult<QuestionBody> {
    let id = path_id(path)?;
    let store = state.store.lock().await;
    let question = CatalogService::new(&*store).get_question(id)?;
    Ok(Success::new(QuestionBody { question }))
}

pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    path: Result<Path<QuestionId>, PathRejection>,
) -> ApiResult<QuestionBody> {
    let id = path_id(path)?;
    let store = state.store.lock().await;
    let question = CatalogService::new(&*store).delete_question(id)?;
    Ok(Success::new(QuestionBody { question }))
}

pub async fn create_question(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageParams>, QueryRejection>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> ApiResult<CreatedQuestion> {
    let request = json_body(payload)?;
    let page = page_params(query).page();
    let store = state.store.lock().await;
    let created = CatalogService::new(&*store).create_question(request, page)?;
    Ok(Success::new(created))
}

pub async fn search_questions(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageParams>, QueryRejection>,
    payload: Result<Json<SearchParams>, JsonRejection>,
) -> ApiResult<SearchResults> {
    let params = json_body(payload)?;
    let page = page_params(query).page();
    let store = state.store.lock().await;
    let results = CatalogService::new(&*store).search_questions(params.search_term.as_deref(), page)?;
    Ok(Success::new(results))
}

pub async fn questions_by_category(
    State(state): State<Arc<AppState>>,
    path: Result<Path<CategoryId>, PathRejection>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<CategoryQuestions> {
    let category_id = path_id(path)?;
    let page = page_params(query).page();
    let store = state.store.lock().await;
    let questions = CatalogService::new(&*store).questions_by_category(category_id, page)?;
    Ok(Success::new(questions))
}

pub async fn next_quiz_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResult<QuizBody> {
    let request = json_body(payload)?;
    let store = state.store.lock().await;
    let outcome = quiz::next_question(&*store, &request, &mut rand::thread_rng())?;

    let question = match outcome {
        quiz::QuizOutcome::Question(question) => Some(question),
        quiz::QuizOutcome::Exhausted => None,
    };
    Ok(Success::new(QuizBody { question }))
}

pub async fn not_found(uri: axum::http::Uri) -> Error {
    Error::NoSuchResource(uri.path().to_string())
}
