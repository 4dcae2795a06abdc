//! Error types for ERD operations.
//!
//! This module provides the main error type [`ErdError`] which wraps
//! the failures that can occur while processing a diagram.

use std::io;

use thiserror::Error;

use erd_core::format::FormatError;
use erd_parser::error::ParseError;

/// The main error type for ERD operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so that callers can render labelled snippets.
#[derive(Debug, Error)]
pub enum ErdError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErdError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use erd_parser::error::{Diagnostic, ErrorCode};

    use super::*;

    #[test]
    fn test_parse_error_displays_first_diagnostic() {
        let err = ErdError::new_parse_error(
            ParseError::from(Diagnostic::error("could not parse table declaration").with_code(ErrorCode::E101)),
            "[A\n",
        );
        assert_eq!(err.to_string(), "error[E101]: could not parse table declaration");
        assert!(matches!(err, ErdError::Parse { ref src, .. } if src == "[A\n"));
    }

    #[test]
    fn test_format_error_converts() {
        let err = ErdError::from(FormatError::InvalidValue {
            text: "a\"b".to_string(),
        });
        assert!(err.to_string().starts_with("Format error: "));
    }
}
