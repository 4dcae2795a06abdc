//! The ERD grammar.
//!
//! ```text
//! root        := expression EOT
//!              | expression <garbage> TRAILING_GARBAGE EOT
//!              | <garbage> TOTAL_GARBAGE EOT
//! expression  := (title | relation | table | comment_line | blank_line)*
//! table       := '[' table_name ']' attributes? newline_or_eot (column | blank_line)*
//! column      := space* column_name attributes? newline_or_eot
//! relation    := space* relation_left space* cardinality_left "--"
//!                cardinality_right space* relation_right attributes? newline_or_eot
//! ```
//!
//! Every production is a named rule, so the tree dump mirrors this layout.

use erd_core::{
    cardinality::Cardinality,
    format::{is_name_delimiter, is_quote_delimiter},
};

use crate::{
    engine::Parser,
    rule::{Action, Rule},
};

/// A grammar production.
pub(crate) type Production = for<'a, 'b> fn(&'a mut Parser<'b>) -> bool;

/// The production for a named rule, usable as a start rule.
pub(crate) fn production(rule: Rule) -> Option<Production> {
    let production: Production = match rule {
        Rule::Root => root,
        Rule::Eot => eot,
        Rule::Expression => expression,
        Rule::BlankLine => blank_line,
        Rule::CommentLine => comment_line,
        Rule::Title => title,
        Rule::Table => table,
        Rule::TableName => table_name,
        Rule::Column => column,
        Rule::ColumnName => column_name,
        Rule::Relation => relation,
        Rule::RelationLeft => relation_left,
        Rule::CardinalityLeft => cardinality_left,
        Rule::RelationRight => relation_right,
        Rule::CardinalityRight => cardinality_right,
        Rule::TitleAttribute => title_attribute,
        Rule::TableAttribute => table_attribute,
        Rule::ColumnAttribute => column_attribute,
        Rule::RelationAttribute => relation_attribute,
        Rule::AttributeKey => attribute_key,
        Rule::AttributeValue => attribute_value,
        Rule::BareValue => bare_value,
        Rule::QuotedValue => quoted_value,
        Rule::AttributeSep => attribute_sep,
        Rule::CommentText => comment_text,
        Rule::Ws => ws,
        Rule::Newline => newline,
        Rule::NewlineOrEot => newline_or_eot,
        Rule::Space => space,
        Rule::Name => name,
        Rule::QuotedText => quoted_text,
        Rule::Cardinality => cardinality,
        Rule::Text | Rule::Action(_) => return None,
    };
    Some(production)
}

pub(crate) fn root(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Root, |p| {
        p.choice(&[
            &|p| expression(p) && eot(p),
            &|p| expression(p) && garbage(p) && p.action(Action::TrailingGarbage) && eot(p),
            &|p| garbage(p) && p.action(Action::TotalGarbage) && eot(p),
        ])
    })
}

fn garbage(p: &mut Parser<'_>) -> bool {
    p.capture(|p| p.one_or_more(|p| p.any_char()))
}

fn eot(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Eot, |p| p.not(|p| p.any_char()))
}

fn expression(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Expression, |p| {
        p.zero_or_more(|p| p.choice(&[&title, &relation, &table, &comment_line, &blank_line]))
    })
}

fn blank_line(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::BlankLine, |p| ws(p) && p.action(Action::ClearCurrent))
}

fn comment_line(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::CommentLine, |p| {
        p.zero_or_more(space) && p.literal("#") && comment_text(p) && newline(p)
    })
}

fn comment_text(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::CommentText, |p| {
        p.capture(|p| p.zero_or_more(|p| p.not(|p| p.char_if(is_line_break)) && p.any_char()))
    })
}

/// `'{' ws* (attr ws* sep? trailer)* ws* '}'`
///
/// Title and relation blocks allow whitespace after each separator; table and
/// column blocks do not.
fn attribute_block(p: &mut Parser<'_>, attribute: Production, spaced: bool) -> bool {
    p.literal("{")
        && p.zero_or_more(ws)
        && p.zero_or_more(|p| {
            attribute(p)
                && p.zero_or_more(ws)
                && p.optional(attribute_sep)
                && (!spaced || p.zero_or_more(ws))
        })
        && p.zero_or_more(ws)
        && p.literal("}")
}

fn title(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Title, |p| {
        p.literal("title")
            && p.zero_or_more(ws)
            && attribute_block(p, title_attribute, true)
            && newline(p)
    })
}

fn table(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Table, |p| {
        p.literal("[")
            && table_name(p)
            && p.literal("]")
            && p.optional(|p| {
                p.zero_or_more(space)
                    && attribute_block(p, table_attribute, false)
                    && p.zero_or_more(space)
            })
            && newline_or_eot(p)
            && p.zero_or_more(|p| p.choice(&[&column, &blank_line]))
    })
}

fn table_name(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::TableName, |p| {
        p.capture(name) && p.action(Action::BeginTable)
    })
}

fn column(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Column, |p| {
        p.zero_or_more(space)
            && column_name(p)
            && p.optional(|p| {
                p.zero_or_more(space)
                    && attribute_block(p, column_attribute, false)
                    && p.zero_or_more(space)
            })
            && newline_or_eot(p)
    })
}

fn column_name(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::ColumnName, |p| {
        p.capture(name) && p.action(Action::BeginColumn)
    })
}

fn relation(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Relation, |p| {
        p.sequence(&[
            &|p| p.zero_or_more(space),
            &relation_left,
            &|p| p.zero_or_more(space),
            &cardinality_left,
            &|p| p.literal("--"),
            &cardinality_right,
            &|p| p.zero_or_more(space),
            &relation_right,
            &|p| p.optional(|p| p.zero_or_more(ws) && attribute_block(p, relation_attribute, true)),
            &newline_or_eot,
            &|p| p.action(Action::CommitRelation),
        ])
    })
}

fn relation_left(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::RelationLeft, |p| {
        p.capture(name) && p.action(Action::SetRelationLeft)
    })
}

fn cardinality_left(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::CardinalityLeft, |p| {
        p.capture(cardinality) && p.action(Action::SetCardinalityLeft)
    })
}

fn relation_right(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::RelationRight, |p| {
        p.capture(name) && p.action(Action::SetRelationRight)
    })
}

fn cardinality_right(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::CardinalityRight, |p| {
        p.capture(cardinality) && p.action(Action::SetCardinalityRight)
    })
}

/// `key space* ':' space* value ACTION`
fn key_value(p: &mut Parser<'_>, action: Action) -> bool {
    attribute_key(p)
        && p.zero_or_more(space)
        && p.literal(":")
        && p.zero_or_more(space)
        && attribute_value(p)
        && p.action(action)
}

fn title_attribute(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::TitleAttribute, |p| {
        key_value(p, Action::AddTitleAttribute)
    })
}

fn table_attribute(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::TableAttribute, |p| {
        key_value(p, Action::AddTableAttribute)
    })
}

fn column_attribute(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::ColumnAttribute, |p| {
        key_value(p, Action::AddColumnAttribute)
    })
}

fn relation_attribute(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::RelationAttribute, |p| {
        key_value(p, Action::AddRelationAttribute)
    })
}

fn attribute_key(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::AttributeKey, |p| {
        p.capture(name) && p.action(Action::StageKey)
    })
}

fn attribute_value(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::AttributeValue, |p| {
        p.choice(&[&bare_value, &quoted_value])
    })
}

fn bare_value(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::BareValue, |p| {
        p.capture(name) && p.action(Action::StageValue)
    })
}

fn quoted_value(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::QuotedValue, |p| {
        p.capture(|p| p.literal("\"") && quoted_text(p) && p.literal("\""))
            && p.action(Action::StageQuotedValue)
    })
}

fn attribute_sep(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::AttributeSep, |p| {
        p.zero_or_more(space) && p.literal(",") && p.zero_or_more(space)
    })
}

fn ws(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Ws, |p| {
        p.one_or_more(|p| p.char_if(|c| matches!(c, ' ' | '\t' | '\r' | '\n')))
    })
}

fn space(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Space, |p| {
        p.one_or_more(|p| p.char_if(|c| matches!(c, ' ' | '\t')))
    })
}

fn newline(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Newline, |p| {
        p.choice(&[&|p| p.literal("\r\n"), &|p| p.literal("\n"), &|p| p.literal("\r")])
    })
}

fn newline_or_eot(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::NewlineOrEot, |p| p.choice(&[&newline, &eot]))
}

fn name(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Name, |p| {
        p.one_or_more(|p| p.not(|p| p.char_if(is_name_delimiter)) && p.any_char())
    })
}

fn quoted_text(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::QuotedText, |p| {
        p.one_or_more(|p| p.not(|p| p.char_if(is_quote_delimiter)) && p.any_char())
    })
}

fn cardinality(p: &mut Parser<'_>) -> bool {
    p.rule(Rule::Cardinality, |p| {
        p.char_if(|c| Cardinality::from_symbol(c).is_some())
    })
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\r' | '\n')
}
