//! HTTP route handlers for the question answering API.

use crate::embedding::Embedder;
use crate::error::QaError;
use crate::retriever::{AddOutcome, Answer, SearchResult};
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, MutexGuard};
use std::time::Instant;

// --- Request/Response types ---

/// Either pre-split `texts` or a pasted `text` blob split on blank lines.
#[derive(Deserialize)]
pub struct AddDocumentsRequest {
    pub texts: Option<Vec<String>>,
    pub text: Option<String>,
}

#[derive(Serialize)]
pub struct AddDocumentsResponse {
    #[serde(flatten)]
    pub outcome: AddOutcome,
    pub total_documents: usize,
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub question: String,
    pub k: Option<usize>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub documents: usize,
    pub dimension: usize,
    pub model: String,
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub total_questions: u64,
    pub total_documents: u64,
    pub total_batches: u64,
    pub avg_question_latency_us: f64,
    pub p50_question_latency_us: f64,
    pub p95_question_latency_us: f64,
    pub p99_question_latency_us: f64,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

fn from_qa_error(e: QaError) -> ApiError {
    let status = match e {
        QaError::DimensionMismatch { .. }
        | QaError::LengthMismatch { .. }
        | QaError::InvalidVector { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, e)
}

fn lock<T>(mutex: &std::sync::Mutex<T>) -> Result<MutexGuard<'_, T>, ApiError> {
    mutex
        .lock()
        .map_err(|_| api_error(StatusCode::INTERNAL_SERVER_ERROR, "Lock poisoned"))
}

// --- Router ---

pub fn create_router<E: Embedder + 'static>(state: Arc<AppState<E>>) -> Router {
    Router::new()
        .route("/documents", post(add_documents::<E>))
        .route("/ask", post(ask::<E>))
        .route("/search", post(search::<E>))
        .route("/health", get(health::<E>))
        .route("/metrics", get(get_metrics::<E>))
        .with_state(state)
}

// --- Handlers ---

async fn add_documents<E: Embedder + 'static>(
    State(state): State<Arc<AppState<E>>>,
    Json(req): Json<AddDocumentsRequest>,
) -> Result<(StatusCode, Json<AddDocumentsResponse>), ApiError> {
    let (outcome, total_documents) = {
        let mut retriever = lock(&state.retriever)?;
        let outcome = match (req.texts, req.text) {
            (Some(texts), None) => retriever.add_documents(texts),
            (None, Some(blob)) => retriever.add_text_blob(&blob),
            _ => {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "Provide exactly one of 'texts' or 'text'",
                ))
            }
        }
        .map_err(from_qa_error)?;
        (outcome, retriever.knowledge_base().len())
    };

    let status = match outcome {
        AddOutcome::Added { count, .. } => {
            if let Ok(mut metrics) = state.metrics.lock() {
                metrics.record_documents(count);
            }
            StatusCode::CREATED
        }
        AddOutcome::Empty => StatusCode::OK,
    };

    Ok((
        status,
        Json(AddDocumentsResponse {
            outcome,
            total_documents,
        }),
    ))
}

async fn ask<E: Embedder + 'static>(
    State(state): State<Arc<AppState<E>>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<Answer>, ApiError> {
    let start = Instant::now();

    let answer = lock(&state.retriever)?
        .answer_question(&req.question)
        .map_err(from_qa_error)?;

    if let Ok(mut metrics) = state.metrics.lock() {
        metrics.record_question(start.elapsed());
    }

    Ok(Json(answer))
}

async fn search<E: Embedder + 'static>(
    State(state): State<Arc<AppState<E>>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let k = req.k.unwrap_or(state.top_k);

    let results = lock(&state.retriever)?
        .search(&req.question, k)
        .map_err(from_qa_error)?;

    Ok(Json(results))
}

async fn health<E: Embedder + 'static>(
    State(state): State<Arc<AppState<E>>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let stats = lock(&state.retriever)?.stats();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        documents: stats.documents,
        dimension: stats.dimension,
        model: stats.model,
    }))
}

async fn get_metrics<E: Embedder + 'static>(
    State(state): State<Arc<AppState<E>>>,
) -> Result<Json<MetricsResponse>, ApiError> {
    let metrics = lock(&state.metrics)?;

    Ok(Json(MetricsResponse {
        total_questions: metrics.total_questions(),
        total_documents: metrics.total_documents(),
        total_batches: metrics.total_batches(),
        avg_question_latency_us: metrics.avg_question_latency_us(),
        p50_question_latency_us: metrics.percentile_question_latency_us(50.0),
        p95_question_latency_us: metrics.percentile_question_latency_us(95.0),
        p99_question_latency_us: metrics.percentile_question_latency_us(99.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::FALLBACK_ANSWER;
    use crate::embedding::HashingEmbedder;
    use crate::retriever::Retriever;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let retriever = Retriever::with_flat_index(HashingEmbedder::new(64));
        create_router(Arc::new(AppState::new(retriever, 3)))
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_ask_empty_knowledge_base() {
        let app = app();
        let (status, body) = call(&app, "POST", "/ask", Some(json!({"question": "anything"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], FALLBACK_ANSWER);
        assert_eq!(body["results"], json!([]));
    }

    #[tokio::test]
    async fn test_add_then_ask() {
        let app = app();
        let (status, body) = call(
            &app,
            "POST",
            "/documents",
            Some(json!({"text": "Rust guarantees memory safety without a garbage collector.\n\nPython is a dynamically typed scripting language."})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "added");
        assert_eq!(body["count"], 2);
        assert_eq!(body["total_documents"], 2);

        let (status, body) = call(
            &app,
            "POST",
            "/ask",
            Some(json!({"question": "Does Rust need a garbage collector for memory safety?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"][0]["rank"], 1);
        assert_eq!(body["results"][0]["id"], 0);
        assert!(body["text"]
            .as_str()
            .unwrap()
            .contains("Rust guarantees memory safety"));

        let (_, metrics) = call(&app, "GET", "/metrics", None).await;
        assert_eq!(metrics["total_questions"], 1);
        assert_eq!(metrics["total_documents"], 2);
    }

    #[tokio::test]
    async fn test_add_empty_blob() {
        let app = app();
        let (status, body) = call(&app, "POST", "/documents", Some(json!({"text": "\n\n  \n"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "empty");
        assert_eq!(body["total_documents"], 0);
    }

    #[tokio::test]
    async fn test_add_requires_one_field() {
        let app = app();
        let (status, _) = call(&app, "POST", "/documents", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_respects_k() {
        let app = app();
        call(
            &app,
            "POST",
            "/documents",
            Some(json!({"texts": ["alpha particles", "beta decay", "gamma rays", "delta wing"]})),
        )
        .await;

        let (status, body) = call(&app, "POST", "/search", Some(json!({"question": "gamma", "k": 2}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (_, body) = call(&app, "POST", "/search", Some(json!({"question": "gamma"}))).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["documents"], 0);
        assert_eq!(body["dimension"], 64);
        assert_eq!(body["model"], "trigram-v1");
    }
}
