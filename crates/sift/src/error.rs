//! Error types for the sift crate.
//!
//! Binding never fails fast: every problem found in the input is reported as a
//! [`FieldError`] keyed to the string-mapping key that caused it, so a caller
//! can show all of them at once.

use thiserror::Error;

/// Message code for a key that must be present but was not supplied.
pub const REQUIRED: &str = "error.required";
/// Message code for a value that is not a valid integer.
pub const NUMBER: &str = "error.number";
/// Message code for a value that is not a valid finite decimal.
pub const REAL: &str = "error.real";
/// Message code for a value that is not `true` or `false`.
pub const BOOLEAN: &str = "error.boolean";
/// Message code for a value that names no known enum variant.
pub const ENUM: &str = "error.enum";

/// A binding failure scoped to one key of the input mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{key}: {message}")]
pub struct FieldError {
    /// The input key that failed (e.g. `price.from`).
    pub key: String,
    /// A message code such as [`NUMBER`].
    pub message: String,
    /// Extra arguments for rendering the message.
    pub args: Vec<String>,
}

impl FieldError {
    /// Creates an error without arguments.
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            key: key.into(),
            message: message.into(),
            args: Vec::new(),
        }
    }

    /// Creates an [`REQUIRED`] error for `key`.
    pub fn required(key: impl Into<String>) -> Self {
        FieldError::new(key, REQUIRED)
    }

    /// Attaches message arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// A codec failure. Codecs do not know which key they parse; the binding
/// that called them turns this into a [`FieldError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CodecError {
    /// A message code such as [`NUMBER`].
    pub message: String,
    /// Extra arguments for rendering the message.
    pub args: Vec<String>,
}

impl CodecError {
    /// Creates an error without arguments.
    pub fn new(message: impl Into<String>) -> Self {
        CodecError {
            message: message.into(),
            args: Vec::new(),
        }
    }

    /// Attaches message arguments, such as the accepted enum names.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Scopes this error to an input key.
    pub fn at(self, key: impl Into<String>) -> FieldError {
        FieldError {
            key: key.into(),
            message: self.message,
            args: self.args,
        }
    }
}

/// Errors raised outside of field binding.
#[derive(Debug, Error)]
pub enum SiftError {
    /// A dialect name that is not one of the supported SQL dialects.
    #[error("unknown SQL dialect '{0}' (expected sqlite, duckdb or postgres)")]
    UnknownDialect(String),

    /// A LIKE pattern that could not be compiled for in-memory matching.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// One or more fields failed to bind.
    #[error("{} field(s) failed to bind: {}", .0.len(), join_errors(.0))]
    Bind(Vec<FieldError>),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<Vec<FieldError>> for SiftError {
    fn from(errors: Vec<FieldError>) -> Self {
        SiftError::Bind(errors)
    }
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
