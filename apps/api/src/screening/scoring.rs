//! Scoring client — submits one resume against the job description and
//! returns the raw model output string.
//!
//! Total by construction: bad input is short-circuited before any network
//! call, and transport failures are folded into an error-shaped JSON string
//! that the reply parser handles like any model output.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::screening::prompts::build_analysis_prompt;
use crate::screening::transport::TransportError;

const SCORE_TIMEOUT_SECS: u64 = 180;

/// Substrings that mark extraction-failure placeholder text. The first is
/// produced by the extraction client itself, the second by the extraction
/// service's own failure replies.
pub const EXTRACTION_FAILURE_MARKERS: [&str; 2] =
    ["Failed to extract text", "Unable to extract text"];

/// Resumes with fewer trimmed characters than this are rejected without a
/// model call; such inputs are extraction debris, not resumes.
pub const MIN_RESUME_CHARS: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Transport
// ────────────────────────────────────────────────────────────────────────────

/// Raw access to the scoring endpoint. Split from `ScoringClient` so tests
/// can count calls and capture prompts.
#[async_trait]
pub trait ScoringTransport: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, TransportError>;
}

#[derive(Serialize)]
struct AnalyzeCall<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeReply {
    result: String,
}

#[derive(Deserialize)]
struct AnalyzeErrorBody {
    error: Option<String>,
}

pub struct HttpScoringTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpScoringTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(SCORE_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ScoringTransport for HttpScoringTransport {
    async fn complete(&self, prompt: &str) -> Result<String, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&AnalyzeCall { prompt })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<AnalyzeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .filter(|m| !m.is_empty());
            return Err(match message {
                Some(message) => TransportError::Rejected(message),
                None => TransportError::Status(status.as_u16()),
            });
        }

        Ok(response.json::<AnalyzeReply>().await?.result)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

pub struct ScoringClient {
    transport: Arc<dyn ScoringTransport>,
}

impl ScoringClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            transport: Arc::new(HttpScoringTransport::new(endpoint)),
        }
    }

    pub fn with_transport(transport: Arc<dyn ScoringTransport>) -> Self {
        Self { transport }
    }

    /// Scores one resume. The return value is always a string the reply
    /// parser can consume: the model's raw output on success, a synthesized
    /// error-shaped JSON string otherwise.
    pub async fn score(&self, resume_text: &str, job_description: &str, file_name: &str) -> String {
        if EXTRACTION_FAILURE_MARKERS
            .iter()
            .any(|marker| resume_text.contains(marker))
        {
            tracing::warn!(file = %file_name, "Skipping analysis, extraction already failed");
            return synthesized_record(
                "Error - Text Extraction Failed",
                truncated_reason(resume_text),
            );
        }

        if resume_text.trim().chars().count() < MIN_RESUME_CHARS {
            tracing::warn!(file = %file_name, "Skipping analysis, extracted text too short");
            return synthesized_record(
                "Error - Insufficient Content",
                format!(
                    "The extracted text from {file_name} appears to be too short or empty. \
                     This might be due to a PDF that contains only images, is password-protected, \
                     or has extraction issues."
                ),
            );
        }

        let prompt = build_analysis_prompt(job_description, resume_text, file_name);
        match self.transport.complete(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(file = %file_name, error = %err, "Analysis call failed");
                synthesized_record(
                    "Error - Analysis Failed",
                    format!("Failed to analyze resume due to AI service error: {err}"),
                )
            }
        }
    }
}

fn synthesized_record(score: &str, reason: String) -> String {
    json!({
        "candidate_name": "Unknown",
        "score": score,
        "reason": reason,
    })
    .to_string()
}

/// First 200 characters of the placeholder plus a fixed ellipsis, capping the
/// reason at 203 characters.
fn truncated_reason(text: &str) -> String {
    let mut reason: String = text.chars().take(200).collect();
    reason.push_str("...");
    reason
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
