//! Analysis orchestrator — drives extract → score → parse over a batch of
//! uploaded documents, sequentially and in upload order.
//!
//! Per-document failures are contained by the clients underneath; every
//! document yields exactly one results row. Only the up-front liveness probe
//! can abort a run, and it does so before any document is touched.

use thiserror::Error;

use crate::screening::extraction::ExtractionClient;
use crate::screening::parser::parse_score_record;
use crate::screening::records::AnalysisResult;
use crate::screening::scoring::ScoringClient;
use crate::screening::session::{BatchPhase, ScreeningSession};

/// Reasons a batch run refuses to start. Messages are user-facing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("Please enter a job description first.")]
    MissingJobDescription,
    #[error("Please upload at least one resume.")]
    NoDocumentsUploaded,
    #[error("Cannot connect to the extraction service at {endpoint}. Please ensure the extraction service is running.")]
    ServiceUnavailable { endpoint: String },
}

pub struct Orchestrator {
    extraction: ExtractionClient,
    scoring: ScoringClient,
}

impl Orchestrator {
    pub fn new(extraction: ExtractionClient, scoring: ScoringClient) -> Self {
        Self {
            extraction,
            scoring,
        }
    }

    /// Runs one batch over the session's documents. `progress` observes every
    /// phase transition, including the final return to `Idle`.
    ///
    /// Entry guards and the liveness probe reject the run without touching
    /// the existing results list. Once the loop starts it processes every
    /// document to completion.
    pub async fn run<F>(
        &self,
        session: &mut ScreeningSession,
        mut progress: F,
    ) -> Result<(), BatchError>
    where
        F: FnMut(&BatchPhase),
    {
        if session.job_description.trim().is_empty() {
            return Err(BatchError::MissingJobDescription);
        }
        if session.documents.is_empty() {
            return Err(BatchError::NoDocumentsUploaded);
        }

        session.phase = BatchPhase::Checking;
        progress(&session.phase);

        if !self.extraction.probe_health().await {
            tracing::warn!(endpoint = self.extraction.endpoint(), "Extraction service is down");
            session.phase = BatchPhase::Idle;
            progress(&session.phase);
            return Err(BatchError::ServiceUnavailable {
                endpoint: self.extraction.endpoint().to_string(),
            });
        }

        session.results.clear();

        let total = session.documents.len();
        for (position, document) in session.documents.iter().enumerate() {
            session.phase = BatchPhase::Running {
                current_file: document.name.clone(),
            };
            progress(&session.phase);
            tracing::info!(
                file = %document.name,
                size = document.byte_size(),
                position = position + 1,
                total,
                "Screening resume"
            );

            let extraction = self.extraction.extract(document).await;
            let raw = self
                .scoring
                .score(&extraction.text, &session.job_description, &document.name)
                .await;
            let record = parse_score_record(&raw);

            tracing::info!(file = %document.name, score = %record.score, "Resume screened");
            session
                .results
                .push(AnalysisResult::from_record(document.name.clone(), record));
        }

        session.phase = BatchPhase::Idle;
        progress(&session.phase);
        Ok(())
    }
}
