//! Collaborator error types and their mapping into [`WorkflowError`]

use risk_types::{RiskId, WorkflowError};
use thiserror::Error;

/// Errors raised by a [`RiskStore`](crate::RiskStore)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Risk not found: {0}")]
    NotFound(RiskId),

    #[error("Version conflict on {risk_id}: expected {expected}, found {actual}")]
    VersionConflict {
        risk_id: RiskId,
        expected: u64,
        actual: u64,
    },

    #[error("Risk already exists: {0}")]
    AlreadyExists(RiskId),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => WorkflowError::RiskNotFound(id),
            StoreError::VersionConflict {
                risk_id,
                expected,
                actual,
            } => WorkflowError::ConcurrentModification {
                risk_id,
                expected,
                actual,
            },
            StoreError::AlreadyExists(id) => WorkflowError::RiskAlreadyExists(id),
            StoreError::Backend(msg) => WorkflowError::Store(msg),
        }
    }
}

/// Errors raised by a [`UserDirectory`](crate::UserDirectory)
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl From<DirectoryError> for WorkflowError {
    fn from(err: DirectoryError) -> Self {
        WorkflowError::Directory(err.to_string())
    }
}

/// Failure to deliver a workflow event. Logged, never surfaced to callers.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}
