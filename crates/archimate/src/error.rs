//! Error types for ArchiMate model operations.
//!
//! This module provides the main error type [`ArchimateError`]. Lookups of a
//! *view* that does not exist are not errors; they are reported as `None` or
//! `false` by the view operations themselves.

use std::io;

use thiserror::Error;

use archimate_parser::ParseError;

/// The main error type for ArchiMate model operations.
///
/// The `Parse` variant keeps the document text, when there is one, so that
/// the reported byte position can be shown in context.
#[derive(Debug, Error)]
pub enum ArchimateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Unknown element type `{kind}`")]
    UnknownElementType { kind: String },

    #[error("Element `{id}` not found")]
    ElementNotFound { id: String },

    #[error("Group `{id}` not found")]
    GroupNotFound { id: String },

    #[error("Node `{id}` is not a group")]
    NotAGroup { id: String },

    #[error("Diagram object `{id}` not found")]
    DiagramObjectNotFound { id: String },

    #[error("Relationship `{id}` not found")]
    RelationshipNotFound { id: String },

    #[error("Missing required field `{field}`")]
    MissingField { field: &'static str },
}

impl ArchimateError {
    /// Create a new `Parse` error with the document text it was raised on.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

impl From<ParseError> for ArchimateError {
    fn from(err: ParseError) -> Self {
        Self::new_parse_error(err, String::new())
    }
}

/// A type alias for `Result<T, ArchimateError>`.
pub type Result<T> = std::result::Result<T, ArchimateError>;
