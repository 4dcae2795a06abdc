//! # ERD Parser
//!
//! Backtracking parser for the ERD diagram language. The pipeline is:
//!
//! 1. **Match** - run the grammar over the code-point [`Buffer`], recording
//!    the span of every successful rule in post-order
//! 2. **Dispatch** - replay the span list against an [`Actions`] collaborator
//! 3. **Build** - the [`Builder`] collaborator assembles an
//!    [`erd_core::semantic::Diagram`] and collects warnings
//!
//! ## Usage
//!
//! ```
//! # use erd_parser::{parse_diagram, ElaborateConfig, ParseError, ParseOptions};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "[Person]\nname\n\nPerson *--1 Car\n";
//!
//!     let elaboration = parse_diagram(source, ParseOptions::default(), ElaborateConfig::default())?;
//!     assert_eq!(elaboration.diagram().tables().len(), 1);
//!     Ok(())
//! }
//! ```

mod buffer;
mod dispatch;
mod elaborate;
mod engine;
pub mod error;
mod failure;
mod grammar;
mod position;
mod recorder;
mod rule;
mod span;
mod tree;

pub use buffer::Buffer;
pub use dispatch::{Actions, execute};
pub use elaborate::{Builder, ElaborateConfig, Elaboration};
pub use error::{Diagnostic, ErrorCode, ParseError};
pub use failure::{FarthestFailure, SyntaxError};
pub use position::{PositionMap, TextPosition, translate_positions};
pub use recorder::Match;
pub use rule::{Action, Rule};
pub use span::{Span, Spanned};
pub use tree::{Node, build_forest, dump_forest};

use log::{debug, info, trace};

use engine::Parser;

/// Options for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    start: Rule,
    span_capacity: usize,
}

impl ParseOptions {
    /// Start at `root` with room for 64 spans.
    pub fn new() -> Self {
        Self {
            start: Rule::Root,
            span_capacity: 64,
        }
    }

    /// Parse with `start` as the top-level production instead of `root`.
    pub fn with_start(mut self, start: Rule) -> Self {
        self.start = start;
        self
    }

    /// Initial capacity of the span list; it doubles as needed.
    pub fn with_span_capacity(mut self, span_capacity: usize) -> Self {
        self.span_capacity = span_capacity;
        self
    }

    pub fn start(&self) -> Rule {
        self.start
    }

    pub fn span_capacity(&self) -> usize {
        self.span_capacity
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// How much of the input the root rule recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The whole input is valid.
    Complete,
    /// A valid prefix ends at `offset`; the rest is unparseable.
    TrailingGarbage { offset: usize },
    /// Nothing is valid from the start of the input.
    TotalGarbage,
}

/// The result of a successful match: the input and its span list.
#[derive(Debug)]
pub struct ParseTree {
    buffer: Buffer,
    matches: Vec<Match>,
    farthest_failure: Option<FarthestFailure>,
}

impl ParseTree {
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// The recorded spans of the winning parse, in post-order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// The deepest failed attempt, even if the parse as a whole succeeded.
    pub fn farthest_failure(&self) -> Option<FarthestFailure> {
        self.farthest_failure
    }

    /// The farthest failure as a located error.
    pub fn syntax_error(&self) -> Option<SyntaxError> {
        self.farthest_failure
            .map(|failure| SyntaxError::new(failure, &self.buffer))
    }

    pub fn outcome(&self) -> Outcome {
        let mut garbage = None;
        for m in &self.matches {
            match m.rule() {
                Rule::Text => garbage = Some(m.span().start()),
                Rule::Action(Action::TrailingGarbage | Action::TotalGarbage) => {
                    return match garbage {
                        Some(offset) if offset > 0 => Outcome::TrailingGarbage { offset },
                        _ => Outcome::TotalGarbage,
                    };
                }
                _ => {}
            }
        }
        Outcome::Complete
    }

    pub fn forest(&self) -> Vec<Node> {
        build_forest(&self.matches)
    }

    /// The parse tree as text, one node per line.
    pub fn dump(&self) -> String {
        dump_forest(&self.forest(), &self.buffer)
    }

    /// Replay the recorded actions against `actions`.
    pub fn execute(&self, actions: &mut impl Actions) {
        execute(&self.buffer, &self.matches, actions);
    }
}

/// Run the grammar over `source`.
///
/// # Errors
///
/// Returns [`SyntaxError`] when the start rule does not match. With the
/// default `root` start rule this does not happen: unparseable input is
/// recorded as garbage and reported through [`Actions::error`].
pub fn parse(source: &str, options: ParseOptions) -> Result<ParseTree, SyntaxError> {
    let buffer = Buffer::new(source);
    let start = options.start();

    let Some(production) = grammar::production(start) else {
        return Err(SyntaxError::new(
            FarthestFailure::new(start, Span::default()),
            &buffer,
        ));
    };

    let mut parser = Parser::new(&buffer, start, options.span_capacity());
    let matched = production(&mut parser);
    let (matches, farthest_failure) = parser.finish();
    trace!(start:% = start, matched, spans = matches.len(); "Grammar finished");

    if !matched {
        let failure =
            farthest_failure.unwrap_or_else(|| FarthestFailure::new(start, Span::default()));
        return Err(SyntaxError::new(failure, &buffer));
    }

    Ok(ParseTree {
        buffer,
        matches,
        farthest_failure,
    })
}

/// Parse `source` and build its diagram.
///
/// # Errors
///
/// Returns [`ParseError`] when the start rule fails to match, or when
/// unparseable input is found and `config.strict` is set.
pub fn parse_diagram(
    source: &str,
    options: ParseOptions,
    config: ElaborateConfig,
) -> Result<Elaboration, ParseError> {
    info!(chars = source.chars().count(), strict = config.strict; "Parsing diagram");

    let tree = parse(source, options).map_err(|err| ParseError::from(err.to_diagnostic(ErrorCode::E100)))?;
    debug!(spans = tree.matches().len(), outcome:? = tree.outcome(); "Source matched");
    trace!(tree:% = tree.dump(); "Parse tree");

    let mut builder = Builder::new(config).with_failure(tree.syntax_error());
    tree.execute(&mut builder);
    builder.build()
}
