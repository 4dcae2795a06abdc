//! Writer for the ERD surface syntax.
//!
//! [`write_source`] turns a [`Diagram`] back into DSL text that parses to an
//! equivalent diagram: the title block first, then every table followed by its
//! indented columns and a blank line, then the relations.

use std::fmt::Write as _;

use thiserror::Error;

use crate::{attributes::Attributes, semantic::Diagram};

/// How attribute values are written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Quote only values that cannot be written bare.
    #[default]
    Auto,
    /// Quote every value.
    Always,
}

/// Options controlling the generated source layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    indent: usize,
    quote_style: QuoteStyle,
}

impl FormatOptions {
    pub fn new(indent: usize, quote_style: QuoteStyle) -> Self {
        Self {
            indent,
            quote_style,
        }
    }

    /// Number of spaces in front of each column line.
    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn quote_style(&self) -> QuoteStyle {
        self.quote_style
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new(2, QuoteStyle::Auto)
    }
}

/// A name or value that has no representation in the surface syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("{kind} `{text}` cannot be written as a bare name")]
    InvalidName { kind: &'static str, text: String },

    #[error("attribute value {text:?} cannot be written in the ERD syntax")]
    InvalidValue { text: String },
}

/// Characters that end a bare name.
pub fn is_name_delimiter(c: char) -> bool {
    matches!(
        c,
        '"' | '\t' | '\r' | '\n' | '/' | ':' | ',' | '[' | ']' | '{' | '}' | ' '
    )
}

/// Characters that cannot appear inside a quoted value.
pub fn is_quote_delimiter(c: char) -> bool {
    matches!(c, '"' | '\t' | '\r' | '\n')
}

/// Returns true if `text` is a valid bare name.
///
/// # Examples
///
/// ```
/// use erd_core::format::is_bare_name;
///
/// assert!(is_bare_name("user_id"));
/// assert!(!is_bare_name("first name"));
/// assert!(!is_bare_name(""));
/// ```
pub fn is_bare_name(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(is_name_delimiter)
}

fn check_name(kind: &'static str, text: String) -> Result<String, FormatError> {
    if is_bare_name(&text) {
        Ok(text)
    } else {
        Err(FormatError::InvalidName { kind, text })
    }
}

fn write_value(out: &mut String, value: &str, style: QuoteStyle) -> Result<(), FormatError> {
    if style == QuoteStyle::Auto && is_bare_name(value) {
        out.push_str(value);
        return Ok(());
    }
    if value.is_empty() || value.chars().any(is_quote_delimiter) {
        return Err(FormatError::InvalidValue {
            text: value.to_string(),
        });
    }
    out.push('"');
    out.push_str(value);
    out.push('"');
    Ok(())
}

fn write_attributes(
    out: &mut String,
    attributes: &Attributes,
    style: QuoteStyle,
) -> Result<(), FormatError> {
    out.push('{');
    for (i, (key, value)) in attributes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&check_name("attribute key", key.to_string())?);
        out.push_str(": ");
        write_value(out, value, style)?;
    }
    out.push('}');
    Ok(())
}

fn write_block(
    out: &mut String,
    attributes: &Attributes,
    style: QuoteStyle,
) -> Result<(), FormatError> {
    if !attributes.is_empty() {
        out.push(' ');
        write_attributes(out, attributes, style)?;
    }
    Ok(())
}

/// Render `diagram` as ERD source text.
///
/// # Errors
///
/// Returns [`FormatError`] when a name is not a valid bare name or a value
/// contains characters that cannot be quoted (`"`, tab, CR, LF) or is empty.
///
/// # Examples
///
/// ```
/// use erd_core::{
///     cardinality::Cardinality,
///     format::{FormatOptions, write_source},
///     identifier::Id,
///     semantic::{Column, Diagram, Relation, Table},
///     attributes::Attributes,
/// };
///
/// let diagram = Diagram::new(
///     Attributes::new(),
///     vec![Table::new(Id::new("Person")).with_column(Column::new(Id::new("name")))],
///     vec![Relation::new(Id::new("Person"), Cardinality::Many, Id::new("Car"), Cardinality::One)],
/// );
///
/// let source = write_source(&diagram, &FormatOptions::default()).unwrap();
/// assert_eq!(source, "[Person]\n  name\n\nPerson *--1 Car\n");
/// ```
pub fn write_source(diagram: &Diagram, options: &FormatOptions) -> Result<String, FormatError> {
    let style = options.quote_style();
    let indent = " ".repeat(options.indent());
    let mut out = String::new();

    if !diagram.title().is_empty() {
        out.push_str("title ");
        write_attributes(&mut out, diagram.title(), style)?;
        out.push_str("\n\n");
    }

    for table in diagram.tables() {
        let name = check_name("table name", table.name().to_string())?;
        let _ = write!(out, "[{name}]");
        write_block(&mut out, table.attributes(), style)?;
        out.push('\n');

        for column in table.columns() {
            let name = check_name("column name", column.name().to_string())?;
            out.push_str(&indent);
            out.push_str(&name);
            write_block(&mut out, column.attributes(), style)?;
            out.push('\n');
        }
        out.push('\n');
    }

    for relation in diagram.relations() {
        let left = check_name("relation endpoint", relation.left().to_string())?;
        let right = check_name("relation endpoint", relation.right().to_string())?;
        let _ = write!(
            out,
            "{left} {}--{} {right}",
            relation.left_cardinality(),
            relation.right_cardinality()
        );
        write_block(&mut out, relation.attributes(), style)?;
        out.push('\n');
    }

    Ok(out)
}
