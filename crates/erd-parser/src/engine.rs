//! Backtracking combinator engine.
//!
//! A [`Parser`] is a single parse session over a [`Buffer`]. Every combinator
//! returns `bool` and is transactional: on failure the cursor and the span
//! list are restored to what they were on entry. Successful named rules append
//! their span after the spans of everything they matched, so the finished
//! span list is a post-order walk of the winning parse.

use crate::{
    buffer::Buffer,
    failure::{FailureTracker, FarthestFailure},
    recorder::{Match, SpanRecorder},
    rule::{Action, Rule},
    span::Span,
};

/// Saved parser state; restoring it undoes everything done since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Checkpoint {
    cursor: usize,
    spans: usize,
}

/// The innermost named rule being matched and where it started.
#[derive(Debug, Clone, Copy)]
struct Frame {
    rule: Rule,
    begin: usize,
}

/// A parse session.
#[derive(Debug)]
pub struct Parser<'b> {
    buffer: &'b Buffer,
    cursor: usize,
    recorder: SpanRecorder,
    failures: FailureTracker,
    frame: Frame,
}

impl<'b> Parser<'b> {
    /// Start a session at offset 0, attributing top-level failures to `start`.
    pub(crate) fn new(buffer: &'b Buffer, start: Rule, span_capacity: usize) -> Self {
        Self {
            buffer,
            cursor: 0,
            recorder: SpanRecorder::with_capacity(span_capacity),
            failures: FailureTracker::default(),
            frame: Frame {
                rule: start,
                begin: 0,
            },
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn span_count(&self) -> usize {
        self.recorder.len()
    }

    /// End the session, yielding the span list and the farthest failure.
    pub(crate) fn finish(self) -> (Vec<Match>, Option<FarthestFailure>) {
        (self.recorder.finish(), self.failures.farthest())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.cursor,
            spans: self.recorder.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.cursor;
        self.recorder.truncate(checkpoint.spans);
    }

    /// Run `f` as one transaction.
    ///
    /// A failure that had advanced the cursor is reported to the failure
    /// tracker before the state is rolled back.
    pub fn attempt(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let checkpoint = self.checkpoint();
        if f(self) {
            return true;
        }
        if self.cursor > checkpoint.cursor {
            self.failures
                .observe(self.frame.rule, self.frame.begin, self.cursor);
        }
        self.restore(checkpoint);
        false
    }

    /// Consume one code point satisfying `pred`. Never matches at the end.
    pub fn char_if(&mut self, pred: impl Fn(char) -> bool) -> bool {
        match self.buffer.get(self.cursor) {
            Some(c) if pred(c) => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    /// Consume one code point unless at the end.
    pub fn any_char(&mut self) -> bool {
        self.char_if(|_| true)
    }

    /// Match `text` exactly; a partial match is rolled back.
    pub fn literal(&mut self, text: &str) -> bool {
        self.attempt(|p| text.chars().all(|expected| p.char_if(|c| c == expected)))
    }

    /// Match every item in order.
    pub fn sequence(&mut self, items: &[&dyn Fn(&mut Self) -> bool]) -> bool {
        self.attempt(|p| items.iter().all(|item| item(p)))
    }

    /// Ordered choice: the first alternative that matches wins.
    pub fn choice(&mut self, alternatives: &[&dyn Fn(&mut Self) -> bool]) -> bool {
        alternatives
            .iter()
            .any(|alternative| self.attempt(|p| alternative(p)))
    }

    /// Repeat `f` until it fails. Always succeeds.
    ///
    /// An iteration that succeeds without consuming input ends the loop.
    pub fn zero_or_more(&mut self, f: impl Fn(&mut Self) -> bool) -> bool {
        loop {
            let before = self.cursor;
            if !self.attempt(&f) || self.cursor == before {
                return true;
            }
        }
    }

    pub fn one_or_more(&mut self, f: impl Fn(&mut Self) -> bool) -> bool {
        self.attempt(|p| f(p) && p.zero_or_more(&f))
    }

    pub fn optional(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        self.attempt(f);
        true
    }

    /// Negative lookahead: succeeds iff `f` fails. Never consumes input or
    /// records spans.
    pub fn not(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let checkpoint = self.checkpoint();
        let matched = self.attempt(f);
        self.restore(checkpoint);
        !matched
    }

    /// Run `f` and record a [`Rule::Text`] span over what it consumed.
    pub fn capture(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let begin = self.cursor;
        self.attempt(|p| {
            if !f(p) {
                return false;
            }
            p.recorder.push(Rule::Text, Span::new(begin..p.cursor));
            true
        })
    }

    /// Run `f` as the named rule `rule`, recording its span on success.
    pub fn rule(&mut self, rule: Rule, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let begin = self.cursor;
        let outer = std::mem::replace(&mut self.frame, Frame { rule, begin });
        let matched = self.attempt(f);
        self.frame = outer;

        if matched {
            self.recorder.push(rule, Span::new(begin..self.cursor));
        }
        matched
    }

    /// Record a zero-width action marker.
    pub fn action(&mut self, action: Action) -> bool {
        self.recorder
            .push(Rule::Action(action), Span::new(self.cursor..self.cursor));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn session(buffer: &Buffer) -> Parser<'_> {
        Parser::new(buffer, Rule::Root, 4)
    }

    #[test]
    fn test_literal_rolls_back_partial_match() {
        let buffer = Buffer::new("tile");
        let mut p = session(&buffer);

        assert!(!p.literal("title"));
        assert_eq!(p.cursor(), 0);
        assert!(p.literal("ti"));
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn test_any_char_stops_at_end() {
        let buffer = Buffer::new("a");
        let mut p = session(&buffer);

        assert!(p.any_char());
        assert!(!p.any_char());
        assert_eq!(p.cursor(), 1);
    }

    #[test]
    fn test_any_char_consumes_max_code_point() {
        let buffer = Buffer::new("\u{10FFFF}b");
        let mut p = session(&buffer);

        assert!(p.any_char());
        assert!(p.any_char());
        assert!(!p.any_char());
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn test_sequence_restores_entry_state() {
        let buffer = Buffer::new("ab");
        let mut p = session(&buffer);

        let matched = p.sequence(&[
            &|p| p.rule(Rule::Name, |p| p.literal("a")),
            &|p| p.literal("c"),
        ]);
        assert!(!matched);
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.span_count(), 0);
    }

    #[test]
    fn test_choice_takes_first_match() {
        let buffer = Buffer::new("\r\n");
        let mut p = session(&buffer);

        assert!(p.choice(&[&|p| p.literal("\r\n"), &|p| p.literal("\r")]));
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn test_zero_or_more_stops_on_empty_iteration() {
        let buffer = Buffer::new("aab");
        let mut p = session(&buffer);

        assert!(p.zero_or_more(|p| p.literal("a")));
        assert_eq!(p.cursor(), 2);

        // a nullable body must not loop forever
        assert!(p.zero_or_more(|p| p.optional(|p| p.literal("x"))));
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn test_one_or_more_requires_one() {
        let buffer = Buffer::new("b");
        let mut p = session(&buffer);

        assert!(!p.one_or_more(|p| p.literal("a")));
        assert!(p.one_or_more(|p| p.literal("b")));
    }

    #[test]
    fn test_rule_records_post_order() {
        let buffer = Buffer::new("ab");
        let mut p = session(&buffer);

        assert!(p.rule(Rule::Expression, |p| {
            p.capture(|p| p.rule(Rule::Name, |p| p.literal("a")))
                && p.action(Action::StageKey)
                && p.literal("b")
        }));

        let (matches, _) = p.finish();
        let rules: Vec<Rule> = matches.iter().map(|m| m.rule()).collect();
        assert_eq!(
            rules,
            [
                Rule::Name,
                Rule::Text,
                Rule::Action(Action::StageKey),
                Rule::Expression
            ]
        );
        assert_eq!(matches[2].span(), Span::new(1..1));
        assert_eq!(matches[3].span(), Span::new(0..2));
    }

    #[test]
    fn test_failure_attributed_to_innermost_rule() {
        let buffer = Buffer::new("[Person\n");
        let mut p = session(&buffer);

        let matched = p.rule(Rule::Table, |p| {
            p.literal("[")
                && p.rule(Rule::TableName, |p| {
                    p.one_or_more(|p| p.char_if(char::is_alphanumeric))
                })
                && p.literal("]")
        });
        assert!(!matched);
        assert_eq!(p.cursor(), 0);

        let (matches, failure) = p.finish();
        assert!(matches.is_empty());
        assert_eq!(
            failure,
            Some(FarthestFailure::new(Rule::Table, Span::new(0..7)))
        );
    }

    #[test]
    fn test_failure_survives_later_success() {
        let buffer = Buffer::new("abc");
        let mut p = session(&buffer);

        assert!(p.choice(&[
            &|p| p.rule(Rule::Relation, |p| p.literal("abx")),
            &|p| p.rule(Rule::Table, |p| p.literal("a")),
        ]));

        let (_, failure) = p.finish();
        assert_eq!(failure.map(|f| f.rule()), Some(Rule::Relation));
        assert_eq!(failure.map(|f| f.span()), Some(Span::new(0..2)));
    }

    proptest! {
        #[test]
        fn not_never_moves_cursor_or_records(
            source in "[a-c\\[\\]\n ]{0,16}",
            start in 0usize..8,
            pattern in "[a-c\\[\\]]{1,3}",
        ) {
            let buffer = Buffer::new(&source);
            let mut p = session(&buffer);
            for _ in 0..start {
                p.any_char();
            }
            let before = (p.cursor(), p.span_count());

            p.not(|p| p.rule(Rule::Name, |p| p.capture(|p| p.literal(&pattern))));
            prop_assert_eq!((p.cursor(), p.span_count()), before);

            p.not(|p| p.rule(Rule::Name, |p| p.zero_or_more(|p| p.any_char())));
            prop_assert_eq!((p.cursor(), p.span_count()), before);
        }
    }
}
