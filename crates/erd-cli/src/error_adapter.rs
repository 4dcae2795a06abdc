//! Rendering [`ErdError`] with miette.
//!
//! Parser spans count code points while miette expects byte offsets, so labels
//! are converted against the source text when they are handed out. A parse
//! error yields one [`Report`] per diagnostic; any other error yields one
//! report without source context.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use erd::ErdError;
use erd_parser::{Span, error::Diagnostic};

/// Something miette can render.
pub enum Report<'a> {
    /// A parser diagnostic and the source it refers to.
    Diagnostic { diag: &'a Diagnostic, src: &'a str },
    /// An error without source location.
    Plain(&'a ErdError),
}

impl fmt::Debug for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Diagnostic { diag, .. } => f.debug_tuple("Diagnostic").field(diag).finish(),
            Report::Plain(err) => f.debug_tuple("Plain").field(err).finish(),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Diagnostic { diag, .. } => f.write_str(diag.message()),
            Report::Plain(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Report<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Report::Diagnostic { .. } => None,
            Report::Plain(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: Box<dyn fmt::Display> = match self {
            Report::Diagnostic { diag, .. } => Box::new(diag.code()?),
            Report::Plain(ErdError::Io(_)) => Box::new("erd::io"),
            Report::Plain(ErdError::Format(_)) => Box::new("erd::format"),
            Report::Plain(ErdError::Config(_)) => Box::new("erd::config"),
            Report::Plain(ErdError::Parse { .. }) => return None,
        };
        Some(code)
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Report::Diagnostic { diag, .. } if diag.severity().is_warning() => {
                Some(miette::Severity::Warning)
            }
            _ => Some(miette::Severity::Error),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Report::Diagnostic { diag, .. } => {
                diag.help().map(|h| Box::new(h) as Box<dyn fmt::Display>)
            }
            Report::Plain(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Report::Diagnostic { src, .. } => Some(src as &dyn SourceCode),
            Report::Plain(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Report::Diagnostic { diag, src } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(move |label| {
            let span = byte_span(label.span(), src);
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Convert a code-point [`Span`] to a byte-based [`SourceSpan`] into `src`.
fn byte_span(span: Span, src: &str) -> SourceSpan {
    SourceSpan::from(span.to_byte_range(src))
}

/// Split an [`ErdError`] into the reports to render.
pub fn to_reports(err: &ErdError) -> Vec<Report<'_>> {
    match err {
        ErdError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Report::Diagnostic { diag, src })
            .collect(),
        _ => vec![Report::Plain(err)],
    }
}

#[cfg(test)]
mod tests {
    use erd_parser::error::{ErrorCode, ParseError};

    use super::*;

    fn code_of(report: &Report<'_>) -> Option<String> {
        report.code().map(|c| c.to_string())
    }

    #[test]
    fn test_parse_error_yields_one_report_per_diagnostic() {
        let err = ErdError::new_parse_error(
            ParseError::from(vec![
                Diagnostic::error("could not parse table declaration")
                    .with_code(ErrorCode::E101)
                    .with_label(Span::new(5..9), "table stops matching here")
                    .with_help("table declarations look like `[Name]`"),
                Diagnostic::warning("relation refers to undeclared table `Car`")
                    .with_code(ErrorCode::E202),
            ]),
            "[A]\n\n[Car\n",
        );

        let reports = to_reports(&err);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].to_string(), "could not parse table declaration");
        assert_eq!(code_of(&reports[0]).as_deref(), Some("E101"));
        assert_eq!(
            reports[0].help().map(|h| h.to_string()).as_deref(),
            Some("table declarations look like `[Name]`")
        );
        assert_eq!(reports[0].severity(), Some(miette::Severity::Error));
        assert_eq!(reports[1].severity(), Some(miette::Severity::Warning));
        assert!(reports[1].labels().is_none());
    }

    #[test]
    fn test_plain_errors_have_no_source() {
        let err = ErdError::Config("Missing configuration file: erd.toml".to_string());

        let reports = to_reports(&err);
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].to_string(),
            "Configuration error: Missing configuration file: erd.toml"
        );
        assert_eq!(code_of(&reports[0]).as_deref(), Some("erd::config"));
        assert!(reports[0].source_code().is_none());
        assert!(reports[0].labels().is_none());
    }

    #[test]
    fn test_labels_keep_primary_flag() {
        let diag = Diagnostic::warning("table `Person` is declared more than once")
            .with_label(Span::new(10..16), "declared again here")
            .with_secondary_label(Span::new(1..7), "first declared here");
        let report = Report::Diagnostic {
            diag: &diag,
            src: "[Person]\n\n[Person]\n",
        };

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert_eq!(labels[0].label(), Some("declared again here"));
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_spans_are_converted_to_bytes() {
        // "é" is two bytes but one code point
        let diag = Diagnostic::warning("table `Café` is declared more than once")
            .with_label(Span::new(1..5), "declared again here");
        let report = Report::Diagnostic {
            diag: &diag,
            src: "[Café]\n",
        };

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels[0].offset(), 1);
        assert_eq!(labels[0].len(), 5);
    }
}
