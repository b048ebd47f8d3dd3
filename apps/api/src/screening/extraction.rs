//! Extraction client — turns uploaded document bytes into resume text via the
//! external extraction service.
//!
//! The client is total: transport and service failures degrade to a
//! descriptive placeholder text instead of propagating. Downstream scoring
//! detects those placeholders and short-circuits.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::screening::document::UploadedDocument;
use crate::screening::transport::TransportError;

const EXTRACT_TIMEOUT_SECS: u64 = 60;

/// Wire shape of the extraction service's `/extract` response. The service
/// may report partial text even when `success` is false.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    #[serde(default)]
    pub text: String,
    pub method: Option<String>,
    pub error: Option<String>,
}

/// Outcome of one extraction attempt. `text` always holds something usable
/// downstream, even if only a failure description.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub text: String,
    pub succeeded: bool,
    pub method: Option<String>,
    pub error_detail: Option<String>,
}

/// Raw HTTP access to the extraction service. Split from `ExtractionClient`
/// so tests can substitute canned responses.
#[async_trait]
pub trait ExtractionTransport: Send + Sync {
    async fn health(&self) -> Result<(), TransportError>;
    async fn extract(&self, file_name: &str, bytes: Bytes) -> Result<ExtractResponse, TransportError>;
    fn endpoint(&self) -> &str;
}

pub struct HttpExtractionTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpExtractionTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(EXTRACT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ExtractionTransport for HttpExtractionTransport {
    async fn health(&self) -> Result<(), TransportError> {
        let response = self.http.get(format!("{}/health", self.base_url)).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(TransportError::Status(response.status().as_u16()))
        }
    }

    async fn extract(&self, file_name: &str, bytes: Bytes) -> Result<ExtractResponse, TransportError> {
        let part = Part::bytes(bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type_for(file_name))
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/extract", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        Ok(response.json::<ExtractResponse>().await?)
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

/// Content type from the filename extension. Unknown extensions fall back to
/// a generic binary type; the service decides what it can handle.
fn content_type_for(file_name: &str) -> &'static str {
    let lower_name = file_name.to_lowercase();
    if lower_name.ends_with(".pdf") {
        "application/pdf"
    } else if lower_name.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower_name.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

pub struct ExtractionClient {
    transport: Arc<dyn ExtractionTransport>,
}

impl ExtractionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            transport: Arc::new(HttpExtractionTransport::new(base_url)),
        }
    }

    pub fn with_transport(transport: Arc<dyn ExtractionTransport>) -> Self {
        Self { transport }
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// True when the service's liveness probe answers 2xx.
    pub async fn probe_health(&self) -> bool {
        self.transport.health().await.is_ok()
    }

    /// Extracts resume text for one document. Never fails: service-reported
    /// failures return the service's own text or a descriptive placeholder,
    /// and transport failures return a placeholder naming the document.
    pub async fn extract(&self, document: &UploadedDocument) -> ExtractionResult {
        match self
            .transport
            .extract(&document.name, document.bytes.clone())
            .await
        {
            Ok(response) if response.success => {
                tracing::info!(
                    file = %document.name,
                    method = response.method.as_deref().unwrap_or("unknown"),
                    chars = response.text.len(),
                    "Text extracted"
                );
                ExtractionResult {
                    text: response.text,
                    succeeded: true,
                    method: response.method,
                    error_detail: None,
                }
            }
            Ok(response) => {
                tracing::warn!(
                    file = %document.name,
                    error = response.error.as_deref().unwrap_or("unknown"),
                    "Text extraction failed"
                );
                let text = if response.text.is_empty() {
                    format!(
                        "Failed to extract text from {}. {}",
                        document.name,
                        response
                            .error
                            .as_deref()
                            .filter(|e| !e.is_empty())
                            .unwrap_or("Unknown error")
                    )
                } else {
                    response.text
                };
                ExtractionResult {
                    text,
                    succeeded: false,
                    method: response.method,
                    error_detail: response.error,
                }
            }
            Err(err) => {
                tracing::warn!(file = %document.name, error = %err, "Extraction request failed");
                ExtractionResult {
                    text: format!(
                        "Failed to extract text from {}. Please ensure the extraction service is running and accessible. Error: {}",
                        document.name, err
                    ),
                    succeeded: false,
                    method: None,
                    error_detail: Some(err.to_string()),
                }
            }
        }
    }
}
