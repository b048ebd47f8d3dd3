//! Session state for a screening run — inputs, progress, and results in one
//! explicit struct instead of ambient mutable state.

use crate::screening::document::UploadedDocument;
use crate::screening::records::AnalysisResult;

/// Where a batch run currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BatchPhase {
    #[default]
    Idle,
    /// Probing the extraction service before touching any document.
    Checking,
    /// Working through documents; `current_file` drives the progress display.
    Running { current_file: String },
}

/// All mutable state for one screening session.
#[derive(Debug, Clone, Default)]
pub struct ScreeningSession {
    pub job_description: String,
    pub documents: Vec<UploadedDocument>,
    pub results: Vec<AnalysisResult>,
    pub phase: BatchPhase,
}

impl ScreeningSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current selection, mirroring a fresh file pick.
    pub fn select_documents(&mut self, documents: Vec<UploadedDocument>) {
        self.documents = documents;
    }

    /// Drops the results and the document selection together.
    pub fn clear_results(&mut self) {
        self.results.clear();
        self.documents.clear();
    }
}
