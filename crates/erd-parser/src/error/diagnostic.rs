//! Diagnostics: severity, labeled spans and help text.

use std::fmt;

use crate::{error::error_code::ErrorCode, span::Span};

/// How serious a diagnostic is.
///
/// An error means no diagram is produced. A warning is advisory and travels
/// alongside the diagram in an [`crate::Elaboration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        *self == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        *self == Severity::Warning
    }
}

impl From<Severity> for log::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => log::Level::Error,
            Severity::Warning => log::Level::Warn,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// A message attached to a code-point span of the source.
///
/// The primary label marks the offending text; secondary labels point at
/// related places such as a first declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            primary: false,
            ..Self::primary(span, message)
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.primary
    }
}

/// A single error or warning about an ERD document.
///
/// Rendered by the CLI roughly as:
///
/// ```text
/// error[E101]: could not parse table declaration
///   --> fleet.erd:4:1
///    |
///  4 | [Car
///    | ^^^^ table stops matching here
///    |
///    = help: table declarations look like `[Name]`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use erd_parser::error::{Diagnostic, ErrorCode};
    /// # use erd_parser::Span;
    /// let diag = Diagnostic::error("could not parse relation")
    ///     .with_code(ErrorCode::E101)
    ///     .with_label(Span::new(10..14), "relation stops matching here")
    ///     .with_help("cardinalities are `0`, `1`, `*` or `+`");
    ///
    /// assert_eq!(diag.primary_span(), Some(Span::new(10..14)));
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Labels in the order they were added.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Downgrade to a warning, keeping code, labels and help.
    pub fn into_warning(self) -> Self {
        Self {
            severity: Severity::Warning,
            ..self
        }
    }
}

/// `error[E101]: message`, or `warning: message` without a code.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{code}]: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let diag = Diagnostic::warning("table `Person` is declared more than once")
            .with_code(ErrorCode::E204)
            .with_label(Span::new(20..26), "declared again here")
            .with_secondary_label(Span::new(1..7), "first declared here")
            .with_help("columns are merged into the first declaration");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E204));
        assert_eq!(
            diag.labels(),
            [
                Label::primary(Span::new(20..26), "declared again here"),
                Label::secondary(Span::new(1..7), "first declared here"),
            ]
        );
        assert_eq!(diag.help(), Some("columns are merged into the first declaration"));
    }

    #[test]
    fn test_primary_span_skips_secondary_labels() {
        let diag = Diagnostic::error("could not parse input")
            .with_secondary_label(Span::new(0..3), "context")
            .with_label(Span::new(5..9), "here");
        assert_eq!(diag.primary_span(), Some(Span::new(5..9)));

        assert_eq!(Diagnostic::warning("no labels").primary_span(), None);
    }

    #[test]
    fn test_display() {
        let coded = Diagnostic::error("could not parse table declaration").with_code(ErrorCode::E101);
        assert_eq!(coded.to_string(), "error[E101]: could not parse table declaration");

        let plain = Diagnostic::warning("column outside a table");
        assert_eq!(plain.to_string(), "warning: column outside a table");
    }

    #[test]
    fn test_into_warning_keeps_details() {
        let diag = Diagnostic::error("could not parse input")
            .with_code(ErrorCode::E102)
            .with_label(Span::new(0..3), "here")
            .into_warning();

        assert_eq!(diag.to_string(), "warning[E102]: could not parse input");
        assert_eq!(diag.labels().len(), 1);
    }

    #[test]
    fn test_severity_log_levels() {
        assert_eq!(log::Level::from(Severity::Error), log::Level::Error);
        assert_eq!(log::Level::from(Severity::Warning), log::Level::Warn);
        assert!(Severity::Error < Severity::Warning);
    }
}
