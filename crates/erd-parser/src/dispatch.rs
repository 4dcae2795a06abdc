//! Ordered semantic-action dispatch.
//!
//! [`execute`] replays a finished span list against an [`Actions`]
//! implementation. Text captures update the "last captured text"; action
//! markers call the bound method with it. Because the span list only holds
//! the winning parse path, each action fires exactly once, in source order.

use log::trace;

use crate::{
    buffer::Buffer,
    recorder::Match,
    rule::{Action, Rule},
    span::{Span, Spanned},
};

/// The domain model driven by a parse.
///
/// Methods are called in the order their markers occur in the source. A
/// relation, for example, sees its left name, left cardinality, right
/// cardinality, right name and attributes before [`Actions::commit_relation`].
pub trait Actions {
    /// Unparseable input starts at `offset`.
    fn error(&mut self, offset: usize, buffer: &Buffer);

    /// A blank line ended the current table and column.
    fn clear_current(&mut self);

    fn begin_table(&mut self, name: Spanned<&str>);

    fn begin_column(&mut self, name: Spanned<&str>);

    /// Finish the relation assembled from the staged endpoints.
    fn commit_relation(&mut self);

    fn set_relation_left(&mut self, name: Spanned<&str>);

    fn set_relation_right(&mut self, name: Spanned<&str>);

    /// `symbol` is one of `0`, `1`, `*`, `+`.
    fn set_cardinality_left(&mut self, symbol: Spanned<&str>);

    fn set_cardinality_right(&mut self, symbol: Spanned<&str>);

    fn add_title_attribute(&mut self);

    fn add_table_attribute(&mut self);

    fn add_column_attribute(&mut self);

    fn add_relation_attribute(&mut self);

    fn stage_key(&mut self, key: Spanned<&str>);

    /// Stage a value; quoted values arrive without their quotes.
    fn stage_value(&mut self, value: Spanned<&str>);
}

/// Replay `matches` against `actions`.
pub fn execute(buffer: &Buffer, matches: &[Match], actions: &mut impl Actions) {
    let mut text = String::new();
    let mut span = Span::default();

    for m in matches {
        let action = match m.rule() {
            Rule::Text => {
                span = m.span();
                text = buffer.text(span);
                continue;
            }
            Rule::Action(action) => action,
            _ => continue,
        };

        trace!(action = action.name(), text:?; "Dispatching action");
        let last = Spanned::new(text.as_str(), span);
        match action {
            Action::TrailingGarbage | Action::TotalGarbage => actions.error(span.start(), buffer),
            Action::ClearCurrent => actions.clear_current(),
            Action::BeginTable => actions.begin_table(last),
            Action::BeginColumn => actions.begin_column(last),
            Action::CommitRelation => actions.commit_relation(),
            Action::SetRelationLeft => actions.set_relation_left(last),
            Action::SetCardinalityLeft => actions.set_cardinality_left(last),
            Action::SetRelationRight => actions.set_relation_right(last),
            Action::SetCardinalityRight => actions.set_cardinality_right(last),
            Action::AddTitleAttribute => actions.add_title_attribute(),
            Action::AddTableAttribute => actions.add_table_attribute(),
            Action::AddColumnAttribute => actions.add_column_attribute(),
            Action::AddRelationAttribute => actions.add_relation_attribute(),
            Action::StageKey => actions.stage_key(last),
            Action::StageValue => actions.stage_value(last),
            Action::StageQuotedValue => actions.stage_value(dequote(last)),
        }
    }
}

/// Strip the surrounding quotes, shrinking the span to match.
fn dequote(quoted: Spanned<&str>) -> Spanned<&str> {
    let span = quoted.span();
    let text = quoted.into_inner();
    match text.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(inner) => Spanned::new(inner, Span::new(span.start() + 1..span.end() - 1)),
        None => Spanned::new(text, span),
    }
}
