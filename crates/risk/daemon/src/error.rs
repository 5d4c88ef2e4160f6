//! Error types for riskd

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use risk_engine::StoreError;
use risk_types::WorkflowError;
use serde::Serialize;
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Rejected by the workflow engine
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Workflow(err) => match err {
                WorkflowError::Validation(_) | WorkflowError::UnresolvedReference { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                WorkflowError::InvalidStateTransition { .. }
                | WorkflowError::ConcurrentModification { .. }
                | WorkflowError::RiskAlreadyExists(_) => StatusCode::CONFLICT,
                WorkflowError::RiskNotFound(_) => StatusCode::NOT_FOUND,
                WorkflowError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                WorkflowError::Directory(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Workflow(err) => err.code(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Workflow(WorkflowError::Validation(errors)) => {
                serde_json::to_value(&errors.0).ok()
            }
            ApiError::Workflow(WorkflowError::UnresolvedReference { field, user_id }) => Some(
                serde_json::json!([{ "field": field, "message": format!("unknown user {}", user_id) }]),
            ),
            ApiError::Workflow(WorkflowError::ConcurrentModification {
                expected, actual, ..
            }) => Some(serde_json::json!({ "expected": expected, "actual": actual })),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;
