//! Core error types for goalpath-core.
//!
//! State-container mutations never fail; errors only arise from
//! configuration, validated constructors, and the AI collaborators (whose
//! failures are absorbed by fallbacks before they reach the user).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for goalpath-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// AI collaborator errors
    #[error("AI collaborator error: {0}")]
    Ai(#[from] AiError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Value outside its allowed inclusive range
    #[error("Value {value} for '{field}' is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Index past the end of a collection
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Failures of the remote text-generation collaborators.
#[derive(Error, Debug)]
pub enum AiError {
    /// No endpoint/credentials configured, or the collaborator is disabled
    #[error("AI service is not configured")]
    NotConfigured,

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("API error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    /// No response within the configured timeout
    #[error("AI request timed out after {}ms", .0.as_millis())]
    Timeout(std::time::Duration),

    /// Response body lacked the expected shape
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    /// Completion content was not valid JSON
    #[error("Failed to parse completion content: {0}")]
    Json(#[from] serde_json::Error),

    /// Generator returned no tasks
    #[error("Task generator returned no tasks")]
    EmptyTaskList,

    /// Task category outside learning/practice/review/project
    #[error("Unknown task category '{0}'")]
    UnknownCategory(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
