//! Unified application error types for the RMA portal.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. None of these errors is fatal to the
//! process: every kind is recoverable by a retry, an edit, or a dismissal.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested ticket or notification was not found.
    NotFound,
    /// A required field is missing or malformed. Submission is blocked.
    Validation,
    /// The purchase date makes the request ineligible outright (future date).
    EligibilityRejection,
    /// A uniqueness constraint was violated (duplicate RMA code, etc.).
    Conflict,
    /// The ticket or notification store failed (network or HTTP error).
    Store,
    /// An attachment upload failed.
    Upload,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// An external collaborator (mail, etc.) failed.
    ExternalService,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::EligibilityRejection => write!(f, "ELIGIBILITY_REJECTION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Store => write!(f, "STORE"),
            Self::Upload => write!(f, "UPLOAD"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Field name to user-facing message, for validation failures.
pub type FieldErrors = BTreeMap<String, String>;

/// The unified application error used throughout the RMA portal.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Per-field messages (only populated for validation failures).
    pub fields: FieldErrors,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: FieldErrors::new(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: FieldErrors::new(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a validation error carrying field-level messages.
    pub fn validation_fields(message: impl Into<String>, fields: FieldErrors) -> Self {
        Self {
            fields,
            ..Self::new(ErrorKind::Validation, message)
        }
    }

    /// Create a hard eligibility rejection (blocks submission).
    pub fn eligibility_rejection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EligibilityRejection, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Store, message)
    }

    /// Create an upload error.
    pub fn upload(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upload, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the same call may succeed if simply repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Store | ErrorKind::Conflict | ErrorKind::Upload
        )
    }

    /// Message for a single field, if this is a field-level validation error.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            fields: self.fields.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let kind = match err.status().map(|s| s.as_u16()) {
            Some(404) => ErrorKind::NotFound,
            Some(409) => ErrorKind::Conflict,
            _ if err.is_decode() => ErrorKind::Serialization,
            _ => ErrorKind::Store,
        };
        Self::with_source(kind, format!("Store request failed: {err}"), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::store("connection refused");
        assert_eq!(err.to_string(), "STORE: connection refused");
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(AppError::store("x").is_retryable());
        assert!(AppError::conflict("x").is_retryable());
        assert!(AppError::upload("x").is_retryable());
        assert!(!AppError::validation("x").is_retryable());
        assert!(!AppError::eligibility_rejection("x").is_retryable());
    }

    #[test]
    fn test_field_errors_survive_clone() {
        let mut fields = FieldErrors::new();
        fields.insert("email".to_string(), "Email is required.".to_string());
        let err = AppError::validation_fields("Please fill in all required fields.", fields);
        let cloned = err.clone();
        assert_eq!(cloned.field("email"), Some("Email is required."));
        assert_eq!(cloned.field("name"), None);
    }
}
