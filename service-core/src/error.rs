//! Error types and the uniform JSON error envelope.
//!
//! Every failed HTTP request is answered with an [`ErrorEnvelope`], rendered
//! through [`ErrorResponse`] so that the status line and the `error` phrase in
//! the body always come from the same [`StatusCode`].

use std::any::Any;

use axum::{
    Extension, Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::middleware::RequestId;

/// Infrastructure failures raised while bootstrapping a service.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Telemetry error: {0}")]
    TelemetryError(anyhow::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

/// Body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// When the envelope was built.
    pub timestamp: DateTime<Utc>,

    /// Human-readable description of the failure.
    pub message: String,

    /// Description of the originating request, e.g. `uri=/get/7`.
    pub details: String,

    /// Reason phrase of the status code the response carries.
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorEnvelope {
    pub fn build(
        message: impl Into<String>,
        details: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
            details: details.into(),
            error: status_phrase(status).to_string(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Reason phrase for a status code, e.g. `"Not Found"` for 404.
pub fn status_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}

/// Short description of a request, safe to echo back to callers.
pub fn request_description(uri: &Uri) -> String {
    format!("uri={}", uri.path())
}

/// A status code paired with the envelope describing it.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    status: StatusCode,
    envelope: ErrorEnvelope,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status,
            envelope: ErrorEnvelope::build(message, details, status),
        }
    }

    pub fn with_request_id(mut self, request_id: Option<RequestId>) -> Self {
        if let Some(RequestId(id)) = request_id {
            self.envelope = self.envelope.with_request_id(id);
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn envelope(&self) -> &ErrorEnvelope {
        &self.envelope
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// Response for requests that matched no route.
pub async fn route_not_found(
    uri: Uri,
    request_id: Option<Extension<RequestId>>,
) -> ErrorResponse {
    ErrorResponse::new(
        StatusCode::NOT_FOUND,
        format!("No route for {}", uri.path()),
        request_description(&uri),
    )
    .with_request_id(request_id.map(|Extension(id)| id))
}

/// 500 envelope for a caught panic. The payload is logged but never written
/// to the response.
pub fn panic_response(
    err: Box<dyn Any + Send + 'static>,
    details: String,
    request_id: Option<RequestId>,
) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, request = %details, "Request handler panicked");

    ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", details)
        .with_request_id(request_id)
        .into_response()
}
