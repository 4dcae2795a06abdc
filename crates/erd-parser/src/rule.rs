//! Identities recorded in the span list.
//!
//! Every named production of the grammar has a [`Rule`]. Two pseudo-rules
//! complete the set: [`Rule::Text`] marks a text capture and
//! [`Rule::Action`] marks a zero-width semantic action that the dispatcher
//! turns into a call on the domain model.

use std::fmt;

/// Semantic actions bound to grammar positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Input remains after a valid prefix.
    TrailingGarbage,
    /// Nothing matched from the start of the input.
    TotalGarbage,
    /// A blank line ends the current table.
    ClearCurrent,
    BeginTable,
    BeginColumn,
    CommitRelation,
    SetRelationLeft,
    SetCardinalityLeft,
    SetRelationRight,
    SetCardinalityRight,
    AddTitleAttribute,
    AddTableAttribute,
    AddColumnAttribute,
    AddRelationAttribute,
    StageKey,
    /// Stage a bare attribute value.
    StageValue,
    /// Stage a quoted attribute value; the surrounding quotes are stripped.
    StageQuotedValue,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::TrailingGarbage => "trailing_garbage",
            Action::TotalGarbage => "total_garbage",
            Action::ClearCurrent => "clear_current",
            Action::BeginTable => "begin_table",
            Action::BeginColumn => "begin_column",
            Action::CommitRelation => "commit_relation",
            Action::SetRelationLeft => "set_relation_left",
            Action::SetCardinalityLeft => "set_cardinality_left",
            Action::SetRelationRight => "set_relation_right",
            Action::SetCardinalityRight => "set_cardinality_right",
            Action::AddTitleAttribute => "add_title_attribute",
            Action::AddTableAttribute => "add_table_attribute",
            Action::AddColumnAttribute => "add_column_attribute",
            Action::AddRelationAttribute => "add_relation_attribute",
            Action::StageKey => "stage_key",
            Action::StageValue => "stage_value",
            Action::StageQuotedValue => "stage_quoted_value",
        }
    }
}

/// Identity of a recorded span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Root,
    Eot,
    Expression,
    BlankLine,
    CommentLine,
    Title,
    Table,
    TableName,
    Column,
    ColumnName,
    Relation,
    RelationLeft,
    CardinalityLeft,
    RelationRight,
    CardinalityRight,
    TitleAttribute,
    TableAttribute,
    ColumnAttribute,
    RelationAttribute,
    AttributeKey,
    AttributeValue,
    BareValue,
    QuotedValue,
    AttributeSep,
    CommentText,
    Ws,
    Newline,
    NewlineOrEot,
    Space,
    Name,
    QuotedText,
    Cardinality,
    /// A text capture; the dispatcher remembers its content.
    Text,
    Action(Action),
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Root => "root",
            Rule::Eot => "EOT",
            Rule::Expression => "expression",
            Rule::BlankLine => "blank_line",
            Rule::CommentLine => "comment_line",
            Rule::Title => "title",
            Rule::Table => "table",
            Rule::TableName => "table_name",
            Rule::Column => "column",
            Rule::ColumnName => "column_name",
            Rule::Relation => "relation",
            Rule::RelationLeft => "relation_left",
            Rule::CardinalityLeft => "cardinality_left",
            Rule::RelationRight => "relation_right",
            Rule::CardinalityRight => "cardinality_right",
            Rule::TitleAttribute => "title_attribute",
            Rule::TableAttribute => "table_attribute",
            Rule::ColumnAttribute => "column_attribute",
            Rule::RelationAttribute => "relation_attribute",
            Rule::AttributeKey => "attribute_key",
            Rule::AttributeValue => "attribute_value",
            Rule::BareValue => "bare_value",
            Rule::QuotedValue => "quoted_value",
            Rule::AttributeSep => "attribute_sep",
            Rule::CommentText => "comment_text",
            Rule::Ws => "ws",
            Rule::Newline => "newline",
            Rule::NewlineOrEot => "newline_or_eot",
            Rule::Space => "space",
            Rule::Name => "name",
            Rule::QuotedText => "quoted_text",
            Rule::Cardinality => "cardinality",
            Rule::Text => "text",
            Rule::Action(action) => action.name(),
        }
    }

    /// True for spans that only mark a dispatch point.
    pub fn is_action(self) -> bool {
        matches!(self, Rule::Action(_))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_display_uses_grammar_names() {
        assert_eq!(Rule::Table.to_string(), "table");
        assert_eq!(Rule::Eot.to_string(), "EOT");
        assert_eq!(Rule::Action(Action::BeginTable).to_string(), "begin_table");
    }

    #[test]
    fn test_is_action() {
        assert!(Rule::Action(Action::ClearCurrent).is_action());
        assert!(!Rule::Text.is_action());
        assert!(!Rule::Root.is_action());
    }
}
