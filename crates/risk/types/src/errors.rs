//! Error types for the risk workflow

use crate::{ActionKey, RiskId, UserId};
use serde::{Deserialize, Serialize};

/// A single field-level validation message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Ordered collection of field errors for one request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    /// Record `field` as missing unless the text is present and non-blank
    pub fn require_text(&mut self, field: &str, value: Option<&str>) {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.push(field, "is required");
        }
    }

    /// Record `field` as missing unless the value is present
    pub fn require<T>(&mut self, field: &str, value: Option<&T>) {
        if value.is_none() {
            self.push(field, "is required");
        }
    }

    /// Reject a value that is present but blank
    pub fn reject_blank(&mut self, field: &str, value: Option<&str>) {
        if value.is_some_and(|v| v.trim().is_empty()) {
            self.push(field, "must not be empty");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), WorkflowError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(WorkflowError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Errors that can occur in risk workflow operations.
///
/// Every variant is a per-request rejection; none of them is fatal to the
/// process.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Action '{action}' is not permitted in state {state}")]
    InvalidStateTransition { action: ActionKey, state: String },

    #[error("Risk {risk_id} was modified concurrently (expected version {expected}, found {actual})")]
    ConcurrentModification {
        risk_id: RiskId,
        expected: u64,
        actual: u64,
    },

    #[error("Unresolved user reference in '{field}': {user_id}")]
    UnresolvedReference { field: String, user_id: UserId },

    #[error("Risk not found: {0}")]
    RiskNotFound(RiskId),

    #[error("Risk already exists: {0}")]
    RiskAlreadyExists(RiskId),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Directory error: {0}")]
    Directory(String),
}

impl WorkflowError {
    /// True for rejections a caller can fix by changing the request
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WorkflowError::Validation(_) | WorkflowError::UnresolvedReference { .. }
        )
    }

    /// Short machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::Validation(_) => "VALIDATION_ERROR",
            WorkflowError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            WorkflowError::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            WorkflowError::UnresolvedReference { .. } => "UNRESOLVED_REFERENCE",
            WorkflowError::RiskNotFound(_) => "NOT_FOUND",
            WorkflowError::RiskAlreadyExists(_) => "CONFLICT",
            WorkflowError::Store(_) => "STORAGE_ERROR",
            WorkflowError::Directory(_) => "DIRECTORY_ERROR",
        }
    }
}

/// Result type alias for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        let mut errors = ValidationErrors::new();
        errors.require_text("a", None);
        errors.require_text("b", Some("   "));
        errors.require_text("c", Some("ok"));
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_field("a"));
        assert!(errors.contains_field("b"));
        assert!(!errors.contains_field("c"));
    }

    #[test]
    fn test_reject_blank_allows_absent() {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("a", None);
        assert!(errors.is_empty());
        errors.reject_blank("a", Some(""));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.push("reason", "is required");
        let err = errors.into_result().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("reason is required"));
    }

    #[test]
    fn test_error_display() {
        let err = WorkflowError::InvalidStateTransition {
            action: ActionKey::Validate,
            state: "status=actual_risk".into(),
        };
        assert!(err.to_string().contains("validate"));
        assert!(!err.is_validation());
    }
}
