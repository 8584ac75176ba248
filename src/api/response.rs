//! Response types for the evaluation engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unknown-actor error response.
    pub fn unknown_actor(details: impl Into<String>) -> Self {
        Self::with_details(
            "UNKNOWN_ACTOR",
            "Request actor could not be resolved",
            details,
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an unauthorized (401) response for an unresolved actor.
    pub fn unauthorized(details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::unknown_actor(details),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::EmployeeNotFound { .. } => (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND"),
            EngineError::PeriodNotFound { .. } => (StatusCode::NOT_FOUND, "PERIOD_NOT_FOUND"),
            EngineError::TemplateNotFound { .. } => (StatusCode::NOT_FOUND, "TEMPLATE_NOT_FOUND"),
            EngineError::CatalogItemNotFound { .. } => {
                (StatusCode::NOT_FOUND, "CATALOG_ITEM_NOT_FOUND")
            }
            EngineError::EvaluationNotFound { .. } => {
                (StatusCode::NOT_FOUND, "EVALUATION_NOT_FOUND")
            }
            EngineError::CatalogItemInUse { .. } => (StatusCode::CONFLICT, "ITEM_IN_USE"),
            EngineError::DuplicateId { .. } => (StatusCode::CONFLICT, "DUPLICATE_ID"),
            EngineError::InvalidTransition { .. } => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
            EngineError::AccessDenied { .. } => (StatusCode::FORBIDDEN, "ACCESS_DENIED"),
            EngineError::InvalidRating { .. } => (StatusCode::BAD_REQUEST, "INVALID_RATING"),
            EngineError::MissingRating { .. } => (StatusCode::BAD_REQUEST, "MISSING_RATING"),
            EngineError::InvalidWeights { .. } => (StatusCode::BAD_REQUEST, "INVALID_WEIGHTS"),
            EngineError::ValidationError { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            EngineError::CsvError { .. } => (StatusCode::BAD_REQUEST, "CSV_ERROR"),
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}

/// Summary of a CSV import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Records that did not exist before.
    pub inserted: usize,
    /// Records that replaced an existing entry.
    pub updated: usize,
}
