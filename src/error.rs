//! Error types for the evaluation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing catalogs,
//! evaluation cycles, and score aggregation.

use thiserror::Error;

use crate::models::WorkflowState;

/// The main error type for the evaluation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use evaluation_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee record was not found.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: String,
    },

    /// An evaluation period was not found.
    #[error("Evaluation period not found: {id}")]
    PeriodNotFound {
        /// The period id that was not found.
        id: String,
    },

    /// A job template was not found.
    #[error("Job template not found: {id}")]
    TemplateNotFound {
        /// The template id that was not found.
        id: String,
    },

    /// A catalog item (competency, KPI, value, department, category) was not found.
    #[error("{kind} not found: {id}")]
    CatalogItemNotFound {
        /// The kind of catalog item (e.g. "Competency", "KPI").
        kind: &'static str,
        /// The catalog item id that was not found.
        id: String,
    },

    /// A catalog item is still referenced by a job template or employee.
    #[error("{kind} '{id}' is still referenced by '{referenced_by}'")]
    CatalogItemInUse {
        /// The kind of catalog item.
        kind: &'static str,
        /// The catalog item id.
        id: String,
        /// The id of the template or employee holding the reference.
        referenced_by: String,
    },

    /// A review cycle or evaluation was not found.
    #[error("Evaluation not found: {id}")]
    EvaluationNotFound {
        /// The cycle or evaluation id that was not found.
        id: String,
    },

    /// An entity with the same id already exists.
    #[error("{kind} already exists: {id}")]
    DuplicateId {
        /// The kind of entity.
        kind: &'static str,
        /// The duplicate id.
        id: String,
    },

    /// A workflow action was attempted from a state that does not allow it.
    #[error("Cannot {action} while workflow is in state '{state}'")]
    InvalidTransition {
        /// The attempted action (e.g. "submit_self").
        action: &'static str,
        /// The workflow state the cycle was in.
        state: WorkflowState,
    },

    /// The acting employee is not allowed to perform the operation.
    #[error("Employee '{actor}' is not permitted to {action}")]
    AccessDenied {
        /// The id of the acting employee.
        actor: String,
        /// The operation that was denied.
        action: String,
    },

    /// A rating fell outside the configured rating scale.
    #[error("Invalid rating {rating} for item '{item_id}': must be between {min} and {max}")]
    InvalidRating {
        /// The line item the rating was given for.
        item_id: String,
        /// The offending rating value, as a string.
        rating: String,
        /// The lower bound of the rating scale, as a string.
        min: String,
        /// The upper bound of the rating scale, as a string.
        max: String,
    },

    /// A required line item has no rating.
    #[error("Missing rating for {section} item '{item_id}'")]
    MissingRating {
        /// The section the item belongs to.
        section: String,
        /// The unrated item id.
        item_id: String,
    },

    /// Weights did not sum to the documented total.
    #[error("Invalid weights in {scope}: sum is {actual}, expected {expected}")]
    InvalidWeights {
        /// What the weights belong to (e.g. "template 'engineer' kpis section").
        scope: String,
        /// The actual sum, as a string.
        actual: String,
        /// The expected sum, as a string.
        expected: String,
    },

    /// A record failed a validation rule not covered by a more specific variant.
    #[error("Invalid {field}: {message}")]
    ValidationError {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A CSV import payload could not be parsed.
    #[error("Failed to parse CSV record {line}: {message}")]
    CsvError {
        /// The 1-based record number that failed.
        line: u64,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
