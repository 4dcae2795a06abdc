//! Farthest-failure tracking and syntax errors.
//!
//! A backtracking parser fails in many places on the way to a successful
//! parse. The failure that got furthest into the input is the best guess at
//! what the author meant, so it is the one reported.

use thiserror::Error;

use crate::{
    buffer::Buffer,
    error::{Diagnostic, ErrorCode},
    position::{TextPosition, translate_positions},
    rule::Rule,
    span::Span,
};

/// The innermost named rule of the deepest failed attempt, and the interval
/// from that rule's entry to the cursor where the attempt gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarthestFailure {
    rule: Rule,
    span: Span,
}

impl FarthestFailure {
    pub fn new(rule: Rule, span: Span) -> Self {
        Self { rule, span }
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Default)]
pub(crate) struct FailureTracker {
    farthest: Option<FarthestFailure>,
}

impl FailureTracker {
    /// Record a failure; only a strictly greater end replaces the marker.
    pub(crate) fn observe(&mut self, rule: Rule, begin: usize, end: usize) {
        if self.farthest.is_none_or(|f| end > f.span.end()) {
            self.farthest = Some(FarthestFailure::new(rule, Span::new(begin..end)));
        }
    }

    pub(crate) fn farthest(&self) -> Option<FarthestFailure> {
        self.farthest
    }
}

/// A located syntax error built from a [`FarthestFailure`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error near {rule} ({begin} - {end}): {text:?}")]
pub struct SyntaxError {
    rule: Rule,
    span: Span,
    begin: TextPosition,
    end: TextPosition,
    text: String,
}

impl SyntaxError {
    pub fn new(failure: FarthestFailure, buffer: &Buffer) -> Self {
        let span = failure.span();
        let positions = translate_positions(buffer, &[span.start(), span.end()]);
        let at = |offset| positions.get(offset).unwrap_or(TextPosition::new(1, 0));

        Self {
            rule: failure.rule(),
            span,
            begin: at(span.start()),
            end: at(span.end()),
            text: buffer.text(span),
        }
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn begin(&self) -> TextPosition {
        self.begin
    }

    pub fn end(&self) -> TextPosition {
        self.end
    }

    /// The source text covered by the failed rule.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render as an error diagnostic with the given code.
    pub fn to_diagnostic(&self, code: ErrorCode) -> Diagnostic {
        let diagnostic = Diagnostic::error(format!("could not parse {}", describe(self.rule)))
            .with_code(code)
            .with_label(self.span, format!("{} stops matching here", self.rule));
        match hint(self.rule) {
            Some(help) => diagnostic.with_help(help),
            None => diagnostic,
        }
    }
}

fn describe(rule: Rule) -> &'static str {
    match rule {
        Rule::Title | Rule::TitleAttribute => "title block",
        Rule::Table | Rule::TableName | Rule::TableAttribute => "table declaration",
        Rule::Column | Rule::ColumnName | Rule::ColumnAttribute => "column",
        Rule::Relation
        | Rule::RelationLeft
        | Rule::RelationRight
        | Rule::CardinalityLeft
        | Rule::CardinalityRight
        | Rule::RelationAttribute => "relation",
        Rule::CommentLine | Rule::CommentText => "comment",
        Rule::AttributeKey
        | Rule::AttributeValue
        | Rule::BareValue
        | Rule::QuotedValue
        | Rule::QuotedText => "attribute",
        _ => "input",
    }
}

fn hint(rule: Rule) -> Option<&'static str> {
    match rule {
        Rule::Table | Rule::TableName => Some("table declarations look like `[Name]`"),
        Rule::Relation | Rule::CardinalityLeft | Rule::CardinalityRight => {
            Some("relations look like `Left *--1 Right`; cardinalities are `0`, `1`, `*` or `+`")
        }
        Rule::Title => Some("title blocks look like `title {label: \"My ERD\"}`"),
        Rule::QuotedValue | Rule::QuotedText => {
            Some("quoted values are closed with `\"` on the same line")
        }
        Rule::TableAttribute
        | Rule::ColumnAttribute
        | Rule::RelationAttribute
        | Rule::TitleAttribute => Some("attributes look like `key: value` or `key: \"quoted value\"`"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_keeps_strictly_farthest() {
        let mut tracker = FailureTracker::default();
        assert_eq!(tracker.farthest(), None);

        tracker.observe(Rule::Relation, 0, 4);
        tracker.observe(Rule::Table, 0, 4);
        tracker.observe(Rule::Column, 2, 3);
        assert_eq!(
            tracker.farthest(),
            Some(FarthestFailure::new(Rule::Relation, Span::new(0..4)))
        );

        tracker.observe(Rule::Table, 0, 7);
        assert_eq!(tracker.farthest().map(|f| f.rule()), Some(Rule::Table));
    }

    #[test]
    fn test_syntax_error_display() {
        let buffer = Buffer::new("[Person\nname\n");
        let failure = FarthestFailure::new(Rule::Table, Span::new(0..7));
        let err = SyntaxError::new(failure, &buffer);

        assert_eq!(err.begin(), TextPosition::new(1, 0));
        assert_eq!(err.end(), TextPosition::new(1, 7));
        assert_eq!(
            err.to_string(),
            "parse error near table (line 1 col 0 - line 1 col 7): \"[Person\""
        );
    }

    #[test]
    fn test_to_diagnostic() {
        let buffer = Buffer::new("A *-1 B\n");
        let failure = FarthestFailure::new(Rule::Relation, Span::new(0..4));
        let diagnostic = SyntaxError::new(failure, &buffer).to_diagnostic(ErrorCode::E101);

        assert_eq!(diagnostic.code(), Some(ErrorCode::E101));
        assert_eq!(diagnostic.message(), "could not parse relation");
        assert_eq!(diagnostic.labels()[0].span(), Span::new(0..4));
        assert!(diagnostic.help().is_some());
    }
}
