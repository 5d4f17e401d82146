//! Error types for the jacoco-gutter library.
//!
//! Parsing failures are surfaced as [`CoverageError::MalformedReport`]; a line
//! without a usable number is reported as [`CoverageError::InvalidLineNumber`]
//! and recorded by the classifier rather than propagated.

use std::io;

use thiserror::Error;

/// Main result type for jacoco-gutter operations.
pub type Result<T> = std::result::Result<T, CoverageError>;

/// Error type for all coverage operations.
#[derive(Error, Debug)]
pub enum CoverageError {
    /// I/O related errors (reading reports or configuration files)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The report bytes are not a well-formed document in the expected schema
    #[error("Malformed coverage report: {message}")]
    MalformedReport {
        /// Error description
        message: String,
        /// Byte offset into the document where the problem was detected
        position: Option<usize>,
    },

    /// A `line` element lacks a usable line number
    #[error(
        "Invalid line number {:?} in {file_name}",
        .raw.as_deref().unwrap_or("<missing>")
    )]
    InvalidLineNumber {
        /// Canonical identity of the file containing the line
        file_name: String,
        /// Raw `nr` attribute text, if present
        raw: Option<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CoverageError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new malformed report error pointing at a byte offset
    pub fn malformed_at(message: impl Into<String>, position: usize) -> Self {
        Self::MalformedReport {
            message: message.into(),
            position: Some(position),
        }
    }

    /// Create a new invalid line number error
    pub fn invalid_line_number(file_name: impl Into<String>, raw: Option<String>) -> Self {
        Self::InvalidLineNumber {
            file_name: file_name.into(),
            raw,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error means the report itself could not be used
    pub fn is_malformed_report(&self) -> bool {
        matches!(self, Self::MalformedReport { .. })
    }
}

impl From<serde_yaml::Error> for CoverageError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}
