//! Resume analysis endpoint.
//!
//! Accepts a fully-built prompt, forwards it to the completion backend, and
//! returns the model's reply verbatim. Prompt construction happens client-side
//! so the endpoint stays a thin proxy.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

/// POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let prompt = match req.prompt.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(AppError::Validation("Prompt is required".into())),
    };

    tracing::info!(prompt_chars = prompt.len(), "Forwarding analysis prompt");

    let result = state
        .llm
        .complete(prompt)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(AnalyzeResponse { result }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::llm_client::{CompletionBackend, LlmError};
    use crate::routes::build_router;
    use crate::state::AppState;

    enum Outcome {
        Reply(String),
        Fail(String),
    }

    struct CannedBackend {
        outcome: Outcome,
        calls: AtomicUsize,
    }

    impl CannedBackend {
        fn replying(text: &str) -> Self {
            Self {
                outcome: Outcome::Reply(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                outcome: Outcome::Fail(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for CannedBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Outcome::Reply(text) => Ok(text.clone()),
                Outcome::Fail(message) => Err(LlmError::Api {
                    status: 500,
                    message: message.clone(),
                }),
            }
        }
    }

    fn router_with(backend: Arc<CannedBackend>) -> Router {
        build_router(AppState { llm: backend })
    }

    async fn post_analyze(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_missing_prompt_rejected() {
        let backend = Arc::new(CannedBackend::replying("unused"));
        let (status, body) = post_analyze(router_with(backend.clone()), json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Prompt is required" }));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let backend = Arc::new(CannedBackend::replying("unused"));
        let (status, body) =
            post_analyze(router_with(backend.clone()), json!({ "prompt": "" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Prompt is required");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_analysis_returns_result() {
        let backend = Arc::new(CannedBackend::replying(
            r#"{"candidate_name": "Ada", "score": "Excellent", "reason": "Strong match."}"#,
        ));
        let (status, body) = post_analyze(
            router_with(backend.clone()),
            json!({ "prompt": "Compare this resume..." }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["result"]
            .as_str()
            .unwrap()
            .contains("\"candidate_name\": \"Ada\""));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backend_failure_maps_to_500() {
        let backend = Arc::new(CannedBackend::failing("rate limit exceeded"));
        let (status, body) =
            post_analyze(router_with(backend), json!({ "prompt": "analyze" })).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to analyze resume");
        assert!(body["details"]
            .as_str()
            .unwrap()
            .contains("rate limit exceeded"));
    }
}
