//! Accumulating diagnostics while a diagram is built.

use crate::error::{Diagnostic, ParseError};

/// Gathers every diagnostic of one build so they are reported together.
///
/// Advisories are raised out of order (undeclared relation endpoints are only
/// known at the end), so [`DiagnosticCollector::finish`] puts them back into
/// source order by primary span.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity().is_error())
    }

    /// The warnings if nothing was an error, otherwise a [`ParseError`]
    /// holding everything. Diagnostics without a primary span go last.
    pub fn finish(mut self) -> Result<Vec<Diagnostic>, ParseError> {
        self.diagnostics.sort_by_key(|diagnostic| {
            diagnostic
                .primary_span()
                .map_or(usize::MAX, |span| span.start())
        });

        if self.has_errors() {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_empty_collector_has_no_warnings() {
        assert!(DiagnosticCollector::new().finish().unwrap().is_empty());
    }

    #[test]
    fn test_any_error_fails_the_build() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("column `x` is not inside a table").with_label(Span::new(4..5), "ignored"));
        assert!(!collector.has_errors());

        collector.emit(
            Diagnostic::error("could not parse table declaration")
                .with_code(ErrorCode::E101)
                .with_label(Span::new(0..3), "here"),
        );
        assert!(collector.has_errors());

        let err = collector.finish().unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().map(Diagnostic::code).collect();
        assert_eq!(codes, [Some(ErrorCode::E101), None]);
    }

    #[test]
    fn test_warnings_come_back_in_source_order() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("unlabeled"));
        collector.emit(Diagnostic::warning("late").with_label(Span::new(30..33), "b"));
        collector.emit(Diagnostic::warning("early").with_label(Span::new(2..5), "a"));
        collector.emit(Diagnostic::warning("also early").with_label(Span::new(2..4), "c"));

        let messages: Vec<String> = collector
            .finish()
            .unwrap()
            .iter()
            .map(|d| d.message().to_string())
            .collect();
        assert_eq!(messages, ["early", "also early", "late", "unlabeled"]);
    }
}
