//! Error codes for the ERD diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Syntax errors found by the grammar
//! - `E2xx` - Model advisories raised while building the diagram

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Structural parse failure.
    ///
    /// The start rule did not match the input at all.
    E100,

    /// Trailing garbage.
    ///
    /// A valid prefix was recognized but unparseable input remains after it.
    E101,

    /// Total garbage.
    ///
    /// Nothing could be recognized from the start of the input.
    E102,

    // =========================================================================
    // Model Advisories (E2xx)
    // =========================================================================
    /// Column outside a table.
    ///
    /// A column line appeared with no table open, for example after a blank
    /// line closed the table.
    E200,

    /// Incomplete relation.
    ///
    /// A relation was committed with an endpoint or cardinality missing.
    E201,

    /// Undeclared relation endpoint.
    ///
    /// A relation refers to a table that is never declared.
    E202,

    /// Duplicate attribute key.
    ///
    /// The same key appears twice in one attribute block; the last value wins.
    E203,

    /// Duplicate table.
    ///
    /// A table name is declared more than once; later columns extend the
    /// first declaration.
    E204,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Syntax errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            // Model advisories
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "structural parse failure",
            ErrorCode::E101 => "trailing garbage",
            ErrorCode::E102 => "unrecognized input",
            ErrorCode::E200 => "column outside a table",
            ErrorCode::E201 => "incomplete relation",
            ErrorCode::E202 => "undeclared relation endpoint",
            ErrorCode::E203 => "duplicate attribute key",
            ErrorCode::E204 => "duplicate table",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
