//! Error types for record loading and validation

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Message carried by [`ValidationError::MissingIsbn`]
pub const MISSING_ISBN_MESSAGE: &str = "Document should have either an ISBN10 or ISBN13";

/// Message carried by [`ValidationError::Isbn10Format`] when the length check fails
pub const ISBN10_LENGTH_MESSAGE: &str = "ISBN10 should be 10 digits.";

/// Message carried by [`ValidationError::Isbn10Format`] when the checksum fails
pub const ISBN10_CHECKSUM_MESSAGE: &str = "ISBN10 digit sum should be divisible by 11.";

/// Why a single raw record could not become a [`crate::BookRecord`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Neither `isbn_10` nor `isbn_13` was given
    #[error("{message} (title: {title:?})")]
    MissingIsbn { title: String, message: String },

    /// `isbn_10` failed the length or checksum rule
    #[error("{message} (value: {value:?})")]
    Isbn10Format { value: String, message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid value for field {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Field {field} must not be empty")]
    EmptyField { field: &'static str },
}

impl ValidationError {
    pub(crate) fn missing_isbn(title: impl Into<String>) -> Self {
        Self::MissingIsbn {
            title: title.into(),
            message: MISSING_ISBN_MESSAGE.to_string(),
        }
    }

    pub(crate) fn isbn10_format(value: impl Into<String>, message: &str) -> Self {
        Self::Isbn10Format {
            value: value.into(),
            message: message.to_string(),
        }
    }

    /// Stable snake_case tag, used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingIsbn { .. } => "missing_isbn",
            ValidationError::Isbn10Format { .. } => "isbn10_format",
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::InvalidField { .. } => "invalid_field",
            ValidationError::EmptyField { .. } => "empty_field",
        }
    }

    /// Human-readable message without the context suffix
    pub fn message(&self) -> String {
        match self {
            ValidationError::MissingIsbn { message, .. }
            | ValidationError::Isbn10Format { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// The title or offending value this error refers to, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            ValidationError::MissingIsbn { title, .. } => Some(title),
            ValidationError::Isbn10Format { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// First invalid record of a fail-fast batch
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Record {index}: {source}")]
pub struct BatchError {
    pub index: usize,
    #[source]
    pub source: ValidationError,
}

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input must be a JSON array of records, got {0}")]
    NotAnArray(&'static str),

    #[error("Record {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("No record at index {index} (input has {len})")]
    RecordIndex { index: usize, len: usize },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Validation failed: {0}")]
    Batch(#[from] BatchError),
}
