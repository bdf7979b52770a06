// tests/api_client.rs

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use mock_test::{
    ApiClient, Question, QuestionDraft, QuestionUpdate, QuestionWithAnswer, RequestError,
    TestResult,
};
use serde::Deserialize;

#[derive(Default)]
struct Backend {
    questions: Vec<QuestionWithAnswer>,
    next_id: i64,
}

type Shared = Arc<Mutex<Backend>>;

#[derive(Deserialize)]
struct SubmitBody {
    answers: Vec<usize>,
}

async fn list(State(state): State<Shared>) -> Json<Vec<QuestionWithAnswer>> {
    Json(state.lock().unwrap().questions.clone())
}

async fn create(
    State(state): State<Shared>,
    Json(draft): Json<QuestionDraft>,
) -> (StatusCode, Json<QuestionWithAnswer>) {
    let mut backend = state.lock().unwrap();
    backend.next_id += 1;
    let now = Utc::now();
    let record = QuestionWithAnswer {
        question: Question {
            id: backend.next_id,
            question_text: draft.question_text,
            options: draft.options,
            created_at: now,
            updated_at: now,
        },
        correct_answer: draft.correct_answer,
    };
    backend.questions.push(record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn fetch(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<QuestionWithAnswer>, StatusCode> {
    let backend = state.lock().unwrap();
    backend
        .questions
        .iter()
        .find(|q| q.question.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(update): Json<QuestionUpdate>,
) -> Result<Json<QuestionWithAnswer>, StatusCode> {
    let mut backend = state.lock().unwrap();
    let record = backend
        .questions
        .iter_mut()
        .find(|q| q.question.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;

    if let Some(text) = update.question_text {
        record.question.question_text = text;
    }
    if let Some(options) = update.options {
        record.question.options = options;
    }
    if let Some(correct_answer) = update.correct_answer {
        record.correct_answer = correct_answer;
    }
    record.question.updated_at = Utc::now();
    Ok(Json(record.clone()))
}

async fn remove(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut backend = state.lock().unwrap();
    let before = backend.questions.len();
    backend.questions.retain(|q| q.question.id != id);
    if backend.questions.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn test_questions(State(state): State<Shared>) -> Json<Vec<Question>> {
    let backend = state.lock().unwrap();
    Json(backend.questions.iter().map(|q| q.question.clone()).collect())
}

async fn submit(
    State(state): State<Shared>,
    Json(body): Json<SubmitBody>,
) -> Result<Json<TestResult>, StatusCode> {
    let backend = state.lock().unwrap();
    if body.answers.len() != backend.questions.len() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let total = backend.questions.len() as u32;
    let score = backend
        .questions
        .iter()
        .zip(&body.answers)
        .filter(|(q, a)| q.correct_answer == **a)
        .count() as u32;
    let percentage = if total == 0 {
        0
    } else {
        (score as f64 / total as f64 * 100.0).round() as u32
    };
    Ok(Json(TestResult {
        score,
        total,
        percentage,
    }))
}

fn routes(state: Shared) -> Router {
    Router::new()
        .route("/api/admin/questions", get(list).post(create))
        .route(
            "/api/admin/questions/{id}",
            get(fetch).patch(update).delete(remove),
        )
        .route("/api/test/questions", get(test_questions))
        .route("/api/test/submit", post(submit))
        .with_state(state)
}

/// Serves `app` on a random port and returns its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}/api", port)
}

async fn spawn_backend() -> (ApiClient, Shared) {
    let state: Shared = Arc::default();
    let base_url = serve(routes(state.clone())).await;
    (ApiClient::new(base_url).unwrap(), state)
}

fn draft(text: &str, correct_answer: usize) -> QuestionDraft {
    QuestionDraft {
        question_text: text.to_string(),
        options: ["A".into(), "B".into(), "C".into(), "D".into()],
        correct_answer,
    }
}

#[tokio::test]
async fn create_then_read_back_keeps_options_and_answer() {
    let (api, _) = spawn_backend().await;

    let created = api.create_question(&draft("Pick C", 2)).await.unwrap();
    let fetched = api.get_question_with_answer(created.id()).await.unwrap();

    assert_eq!(fetched.question.options, ["A", "B", "C", "D"]);
    assert_eq!(fetched.correct_answer, 2);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_returns_answer_key_and_test_questions_do_not() {
    let (api, _) = spawn_backend().await;
    api.create_question(&draft("one", 0)).await.unwrap();
    api.create_question(&draft("two", 3)).await.unwrap();

    let admin = api.list_questions_with_answers().await.unwrap();
    assert_eq!(admin.len(), 2);
    assert_eq!(admin[1].correct_answer, 3);

    let test = api.list_test_questions().await.unwrap();
    let texts: Vec<&str> = test.iter().map(|q| q.question_text.as_str()).collect();
    assert_eq!(texts, vec!["one", "two"]);
}

#[tokio::test]
async fn patch_sends_only_present_fields() {
    let (api, _) = spawn_backend().await;
    let created = api.create_question(&draft("before", 1)).await.unwrap();

    let update = QuestionUpdate {
        question_text: Some("after".to_string()),
        ..Default::default()
    };
    let updated = api.update_question(created.id(), &update).await.unwrap();

    assert_eq!(updated.question.question_text, "after");
    assert_eq!(updated.correct_answer, 1);
    assert_eq!(updated.question.options, created.question.options);
}

#[tokio::test]
async fn delete_removes_question() {
    let (api, _) = spawn_backend().await;
    let created = api.create_question(&draft("gone", 0)).await.unwrap();

    api.delete_question(created.id()).await.unwrap();

    let err = api.get_question_with_answer(created.id()).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(api.list_questions_with_answers().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_question_is_status_error() {
    let (api, _) = spawn_backend().await;
    let err = api.delete_question(42).await.unwrap_err();
    assert!(matches!(err, RequestError::Status { status: 404, .. }));
}

#[tokio::test]
async fn submit_returns_server_score() {
    let (api, _) = spawn_backend().await;
    for (i, correct) in [0, 1, 2].into_iter().enumerate() {
        api.create_question(&draft(&format!("q{}", i), correct))
            .await
            .unwrap();
    }

    let result = api.submit_test(&[0, 1, 3]).await.unwrap();
    assert_eq!(
        result,
        TestResult {
            score: 2,
            total: 3,
            percentage: 67,
        }
    );
}

#[tokio::test]
async fn submit_rejected_by_server_is_status_error() {
    let (api, _) = spawn_backend().await;
    api.create_question(&draft("q", 0)).await.unwrap();

    let err = api.submit_test(&[]).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let app = Router::new().route(
        "/api/test/questions",
        get(|| async { Json(serde_json::json!({ "questions": [] })) }),
    );
    let api = ApiClient::new(serve(app).await).unwrap();

    let err = api.list_test_questions().await.unwrap_err();
    assert!(matches!(err, RequestError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let api = ApiClient::new(format!("http://127.0.0.1:{}/api", port)).unwrap();
    let err = api.list_questions_with_answers().await.unwrap_err();
    assert!(matches!(err, RequestError::Network(_)));
}
