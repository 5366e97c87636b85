use std::time::Duration;
use thiserror::Error;

/// Failures of a single `/analyze` request
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("URL parameter is required")]
    MissingUrl,

    #[error("Invalid URL provided")]
    InvalidUrl,

    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl AnalyzeError {
    /// Whether the caller supplied bad input, as opposed to a processing failure
    pub fn is_input_error(&self) -> bool {
        matches!(self, AnalyzeError::MissingUrl | AnalyzeError::InvalidUrl)
    }
}

/// Failures while acquiring the browser or running the page audit
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to start a browser session: {0}")]
    Connect(String),

    #[error("I/O error while running the audit: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audit timed out after {0:?}")]
    Timeout(Duration),

    #[error("Audit tool exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Page could not be loaded: {0}")]
    Navigation(String),

    #[error("Audit report could not be parsed: {0}")]
    Report(#[from] serde_json::Error),
}

/// Failures talking to the green hosting registry; always absorbed
#[derive(Debug, Error)]
pub(crate) enum GreenCheckError {
    #[error("Green hosting check failed with status: {0}")]
    Status(u16),

    #[error("Green hosting request failed: {0}")]
    Request(#[from] reqwest::Error),
}
