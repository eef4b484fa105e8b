//! Custom error types for SessionBook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for SessionBook operations
#[derive(Error, Debug)]
pub enum SessionBookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for caller-supplied arguments
    #[error("{0}")]
    Validation(String),

    /// Malformed input: missing CSV header, bad date, undecodable upload
    #[error("Invalid input: {0}")]
    InputFormat(String),

    /// The calendar collaborator failed or returned something unusable
    #[error("Calendar source error: {0}")]
    ExternalSource(String),
}

impl SessionBookError {
    /// Check if this is an input format error
    pub fn is_input_format(&self) -> bool {
        matches!(self, Self::InputFormat(_))
    }

    /// Check if this is an external source error
    pub fn is_external_source(&self) -> bool {
        matches!(self, Self::ExternalSource(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SessionBookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SessionBookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for SessionBookError {
    fn from(err: csv::Error) -> Self {
        Self::InputFormat(format!("could not read CSV: {}", err))
    }
}

/// Result type alias for SessionBook operations
pub type SessionBookResult<T> = Result<T, SessionBookError>;
