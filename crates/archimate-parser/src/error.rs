//! Error type for reading and writing `.archimate` documents.

use thiserror::Error;

/// Error type for the document lifecycle.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text is not well-formed markup.
    #[error("Malformed document at byte {position}: {message}")]
    Markup { message: String, position: u64 },

    /// The document root is not an ArchiMate model.
    #[error("Expected an `archimate:model` root, found `{found}`")]
    MissingRoot { found: String },

    /// The output sink rejected the document.
    #[error("Failed to write document: {0}")]
    Write(String),
}

/// A type alias for `Result<T, ParseError>`.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::MissingRoot {
            found: "svg".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Expected an `archimate:model` root, found `svg`"
        );

        let err = ParseError::Markup {
            message: "unexpected end".to_string(),
            position: 42,
        };
        assert_eq!(
            err.to_string(),
            "Malformed document at byte 42: unexpected end"
        );
    }
}
