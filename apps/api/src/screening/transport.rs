use thiserror::Error;

/// Failures surfaced by the extraction and scoring transports.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Non-2xx response with no usable error body.
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// The remote service returned a structured error message.
    #[error("{0}")]
    Rejected(String),
    /// Connection-level failure (DNS, refused connection, reset).
    #[error("{0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(err.to_string())
        }
    }
}
