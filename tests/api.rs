//! End-to-end tests driving the axum router in-process

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use trivia::server::{router, AppState};
use trivia::{NewQuestion, SqliteStore, TriviaStore};

/// Six categories, 15 questions: ids 1..=15, category = (id - 1) % 3 + 1
fn app() -> Router {
    let store = SqliteStore::open_in_memory().unwrap();
    for kind in ["Science", "Art", "Geography", "History", "Entertainment", "Sports"] {
        store.insert_category(kind).unwrap();
    }
    for i in 1..=15 {
        let text = if i % 4 == 0 {
            format!("What is the title of entry {}?", i)
        } else {
            format!("Question {}", i)
        };
        store
            .insert_question(&NewQuestion {
                question: text,
                answer: format!("Answer {}", i),
                category: (i - 1) % 3 + 1,
                difficulty: 2,
            })
            .unwrap();
    }
    router(AppState::new(store))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn ids(value: &Value) -> Vec<i64> {
    value["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_get_all_categories() {
    let app = app();
    let (status, data) = send(&app, Method::GET, "/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(data["total_categories"], 6);
    assert_eq!(data["categories"]["1"], "Science");
    assert_eq!(data["categories"]["6"], "Sports");
}

#[tokio::test]
async fn test_questions_page() {
    let app = app();
    let (status, data) = send(&app, Method::GET, "/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(data["total_questions"], 15);
    assert_eq!(data["categories"]["2"], "Art");
    assert_eq!(ids(&data), (1..=10).collect::<Vec<_>>());
    assert_eq!(
        data["questions"][0],
        json!({"id": 1, "question": "Question 1", "answer": "Answer 1", "category": 1, "difficulty": 2})
    );
}

#[tokio::test]
async fn test_pagination() {
    let app = app();
    let (_, page_2) = send(&app, Method::GET, "/questions?page=2", None).await;
    let (_, page_9) = send(&app, Method::GET, "/questions?page=9", None).await;
    let (_, bad_page) = send(&app, Method::GET, "/questions?page=abc", None).await;
    let (_, zero_page) = send(&app, Method::GET, "/questions?page=0", None).await;
    let (_, huge_page) = send(&app, Method::GET, "/questions?page=99999999999999999999", None).await;

    assert_eq!(ids(&page_2), (11..=15).collect::<Vec<_>>());
    assert!(ids(&page_9).is_empty());
    assert_eq!(page_9["total_questions"], 15);
    assert_eq!(ids(&bad_page), (1..=10).collect::<Vec<_>>());
    assert_eq!(ids(&zero_page), (1..=10).collect::<Vec<_>>());
    assert!(ids(&huge_page).is_empty());
    assert_eq!(huge_page["total_questions"], 15);
}

#[tokio::test]
async fn test_delete_question() {
    let app = app();
    let (status, data) = send(&app, Method::DELETE, "/questions/3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(data["question"]["id"], 3);
    assert_eq!(data["question"]["answer"], "Answer 3");

    let (status, data) = send(&app, Method::GET, "/questions/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(data["success"], false);
}

#[tokio::test]
async fn test_delete_question_not_exist() {
    let app = app();
    let (status, data) = send(&app, Method::DELETE, "/questions/10000000", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(data, json!({"success": false, "error": 404, "message": "Not found"}));

    let (_, all) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(all["total_questions"], 15);
}

#[tokio::test]
async fn test_non_numeric_question_id_is_not_found() {
    let app = app();
    let (status, data) = send(&app, Method::DELETE, "/questions/abc", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(data["error"], 404);
}

#[tokio::test]
async fn test_create_question() {
    let app = app();
    let new_question = json!({
        "question": "How do you want to create?",
        "answer": "ok",
        "category": 2,
        "difficulty": 1
    });
    let (status, data) = send(&app, Method::POST, "/questions", Some(new_question)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(data["created"], 16);
    assert_eq!(data["total_questions"], 16);
    assert_eq!(ids(&data).len(), 10);

    let (status, data) = send(&app, Method::GET, "/questions/16", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["question"]["question"], "How do you want to create?");
    assert_eq!(data["question"]["category"], 2);
}

#[tokio::test]
async fn test_create_question_missing_field() {
    let app = app();
    let incomplete = json!({"question": "No answer?", "category": 2, "difficulty": 1});
    let (status, data) = send(&app, Method::POST, "/questions", Some(incomplete)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(data, json!({"success": false, "error": 422, "message": "unprocessable"}));

    let (_, all) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(all["total_questions"], 15);
}

#[tokio::test]
async fn test_create_question_malformed_body() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/questions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_search_question() {
    let app = app();
    let (status, data) = send(&app, Method::POST, "/questions/search", Some(json!({"searchTerm": "TITLE"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(data["total_questions"], 3);
    assert_eq!(ids(&data), vec![4, 8, 12]);
}

#[tokio::test]
async fn test_search_empty_term_matches_all() {
    let app = app();
    let (_, data) = send(&app, Method::POST, "/questions/search", Some(json!({"searchTerm": ""}))).await;
    assert_eq!(data["total_questions"], 15);

    let (_, data) = send(&app, Method::POST, "/questions/search?page=2", Some(json!({}))).await;
    assert_eq!(data["total_questions"], 15);
    assert_eq!(ids(&data), (11..=15).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_get_question_by_category() {
    let app = app();
    let (status, data) = send(&app, Method::GET, "/categories/2/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(data["current_category"], "Art");
    assert_eq!(data["total_questions"], 15);
    assert_eq!(ids(&data), vec![2, 5, 8, 11, 14]);
}

#[tokio::test]
async fn test_get_question_by_missing_category() {
    let app = app();
    let (status, data) = send(&app, Method::GET, "/categories/1000/questions", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(data["success"], false);
    assert_eq!(data["message"], "unprocessable");
}

#[tokio::test]
async fn test_get_question_to_play() {
    let app = app();
    let previous_questions = [1, 4];
    let body = json!({
        "previous_questions": previous_questions,
        "quiz_category": {"type": "Science", "id": 1}
    });

    for _ in 0..10 {
        let (status, data) = send(&app, Method::POST, "/quizzes", Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data["success"], true);

        let question = &data["question"];
        assert_eq!(question["category"], 1);
        assert!(!previous_questions.contains(&question["id"].as_i64().unwrap()));
    }
}

#[tokio::test]
async fn test_quiz_exhausted_omits_question() {
    let app = app();
    let body = json!({
        "previous_questions": [1, 4, 7, 10, 13],
        "quiz_category": {"type": "Science", "id": "1"}
    });
    let (status, data) = send(&app, Method::POST, "/quizzes", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data, json!({"success": true}));
}

#[tokio::test]
async fn test_quiz_all_categories() {
    let app = app();
    let body = json!({"previous_questions": [], "quiz_category": {"type": "click", "id": 0}});
    let (status, data) = send(&app, Method::POST, "/quizzes", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(data["question"]["id"].is_i64());
}

#[tokio::test]
async fn test_quiz_without_category_is_unprocessable() {
    let app = app();
    let (status, data) = send(&app, Method::POST, "/quizzes", Some(json!({"previous_questions": []}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(data["error"], 422);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = app();
    let (status, data) = send(&app, Method::GET, "/nowhere", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(data["message"], "Not found");
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/questions")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
