//! Failure taxonomy and the status-code table applied to it.
//!
//! | Failure       | Kind       | Status                                  |
//! |---------------|------------|-----------------------------------------|
//! | `NotFound`    | `NotFound` | configured, [`DEFAULT_NOT_FOUND_STATUS`] |
//! | `MalformedId` | `Internal` | 500                                     |
//! | `Internal`    | `Internal` | 500                                     |

use axum::http::StatusCode;
use service_core::error::ErrorResponse;
use thiserror::Error;

/// Status answered when a record id does not exist. Deployments that expect
/// the legacy behaviour set `APP__LOOKUP__NOT_FOUND_STATUS=406`.
pub const DEFAULT_NOT_FOUND_STATUS: StatusCode = StatusCode::NOT_FOUND;

/// Reasons a lookup request can fail. The `Display` text is what callers see.
#[derive(Debug, Error)]
pub enum Failure {
    #[error("Record with id: {id} not found")]
    NotFound { id: i32 },

    /// The path segment could not be turned into an id.
    #[error("{0}")]
    MalformedId(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Internal,
}

impl Failure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Failure::NotFound { .. } => ErrorKind::NotFound,
            Failure::MalformedId(_) | Failure::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorClassifier {
    not_found_status: StatusCode,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOT_FOUND_STATUS)
    }
}

impl ErrorClassifier {
    pub fn new(not_found_status: StatusCode) -> Self {
        Self { not_found_status }
    }

    pub fn not_found_status(&self) -> StatusCode {
        self.not_found_status
    }

    pub fn classify(&self, failure: &Failure) -> (ErrorKind, StatusCode) {
        let kind = failure.kind();
        let status = match kind {
            ErrorKind::NotFound => self.not_found_status,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (kind, status)
    }

    /// Classifies `failure` and wraps it in the error envelope.
    pub fn respond(&self, failure: &Failure, details: impl Into<String>) -> ErrorResponse {
        let (_, status) = self.classify(failure);
        ErrorResponse::new(status, failure.to_string(), details)
    }
}
