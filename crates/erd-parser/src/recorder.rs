//! Append-only record of successful matches.
//!
//! Matches are appended in post-order: a production's own span follows the
//! spans of everything it matched. Rolling back an attempt is a truncation to
//! the length saved at its entry, so a failed attempt leaves no residue.

use crate::{rule::Rule, span::Span};

/// One recorded match: a rule identity and the interval it covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    rule: Rule,
    span: Span,
}

impl Match {
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

/// Growable span list with explicit doubling.
#[derive(Debug)]
pub(crate) struct SpanRecorder {
    matches: Vec<Match>,
}

impl SpanRecorder {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            matches: Vec::with_capacity(capacity.max(1)),
        }
    }

    pub(crate) fn push(&mut self, rule: Rule, span: Span) {
        if self.matches.len() == self.matches.capacity() {
            self.matches.reserve_exact(self.matches.capacity().max(1));
        }
        self.matches.push(Match::new(rule, span));
    }

    pub(crate) fn len(&self) -> usize {
        self.matches.len()
    }

    /// Drop every match recorded after `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.matches.truncate(len);
    }

    /// The finalized list, trimmed to its exact length.
    pub(crate) fn finish(mut self) -> Vec<Match> {
        self.matches.shrink_to_fit();
        self.matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_grows_by_doubling() {
        let mut recorder = SpanRecorder::with_capacity(2);
        for i in 0..5 {
            recorder.push(Rule::Name, Span::new(i..i + 1));
        }
        assert_eq!(recorder.len(), 5);
        assert!(recorder.matches.capacity() >= 8);
    }

    #[test]
    fn test_truncate_discards_tail() {
        let mut recorder = SpanRecorder::with_capacity(4);
        recorder.push(Rule::Name, Span::new(0..1));
        recorder.push(Rule::Text, Span::new(0..1));
        recorder.push(Rule::Space, Span::new(1..2));

        recorder.truncate(1);
        let matches = recorder.finish();
        assert_eq!(matches, [Match::new(Rule::Name, Span::new(0..1))]);
        assert_eq!(matches.capacity(), matches.len());
    }
}
