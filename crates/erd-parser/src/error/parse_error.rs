//! The error returned when a document cannot be turned into a diagram.

use std::fmt;

use crate::error::{Diagnostic, ErrorCode};

/// Every diagnostic raised by a failed parse, errors and warnings alike, in
/// source order.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity().is_error())
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.code() == Some(code))
    }
}

/// Shows the first error, then how many other diagnostics there are.
impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(lead) = self.errors().next().or(self.diagnostics.first()) else {
            return Ok(());
        };
        write!(f, "{lead}")?;
        match self.diagnostics.len() {
            0 | 1 => Ok(()),
            n => write!(f, " (+{} more)", n - 1),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(diagnostics)
    }
}
