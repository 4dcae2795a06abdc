//! Building the diagram model from dispatched actions.
//!
//! [`Builder`] implements [`Actions`]: it keeps the "current table" and
//! "pending relation" context that the action order implies, stages attribute
//! keys and values, and reports advisory problems as warnings.

use std::collections::HashMap;

use log::{debug, log};

use erd_core::{
    attributes::Attributes,
    cardinality::Cardinality,
    identifier::Id,
    semantic::{Column, Diagram, Relation, Table},
};

use crate::{
    buffer::Buffer,
    dispatch::Actions,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    failure::SyntaxError,
    span::{Span, Spanned},
};

/// Configuration for building the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElaborateConfig {
    /// Treat unparseable input as an error rather than a warning.
    pub strict: bool,
}

impl ElaborateConfig {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl Default for ElaborateConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

/// A built diagram together with the warnings raised while building it.
#[derive(Debug)]
pub struct Elaboration {
    diagram: Diagram,
    warnings: Vec<Diagnostic>,
}

impl Elaboration {
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Diagram, Vec<Diagnostic>) {
        (self.diagram, self.warnings)
    }
}

/// Relation fields staged until the relation is committed.
#[derive(Debug, Default)]
struct PendingRelation {
    left: Option<Spanned<Id>>,
    left_cardinality: Option<Cardinality>,
    right: Option<Spanned<Id>>,
    right_cardinality: Option<Cardinality>,
    attributes: Attributes,
}

/// A committed relation and the spans of its endpoint names.
#[derive(Debug)]
struct PlacedRelation {
    relation: Relation,
    left: Span,
    right: Span,
}

/// The [`Actions`] implementation that produces a [`Diagram`].
#[derive(Debug)]
pub struct Builder {
    cfg: ElaborateConfig,
    failure: Option<SyntaxError>,
    title: Attributes,
    tables: Vec<Table>,
    table_index: HashMap<Id, (usize, Span)>,
    relations: Vec<PlacedRelation>,
    current_table: Option<usize>,
    column_open: bool,
    pending: PendingRelation,
    key: Option<Spanned<String>>,
    value: Option<String>,
    diagnostics: DiagnosticCollector,
}

impl Builder {
    pub fn new(cfg: ElaborateConfig) -> Self {
        Self {
            cfg,
            failure: None,
            title: Attributes::new(),
            tables: Vec::new(),
            table_index: HashMap::new(),
            relations: Vec::new(),
            current_table: None,
            column_open: false,
            pending: PendingRelation::default(),
            key: None,
            value: None,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Blame garbage on `failure` rather than on the garbage offset alone.
    pub fn with_failure(mut self, failure: Option<SyntaxError>) -> Self {
        self.failure = failure;
        self
    }

    /// Finish building.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if any error was reported, which in strict mode
    /// includes unparseable input.
    pub fn build(mut self) -> Result<Elaboration, ParseError> {
        for placed in &self.relations {
            let endpoints = [
                (placed.relation.left(), placed.left),
                (placed.relation.right(), placed.right),
            ];
            for (name, span) in endpoints {
                if !self.table_index.contains_key(&name) {
                    report(
                        &mut self.diagnostics,
                        Diagnostic::warning(format!("relation refers to undeclared table `{name}`"))
                            .with_code(ErrorCode::E202)
                            .with_label(span, "no table with this name")
                            .with_help(format!("declare it with `[{name}]`")),
                    );
                }
            }
        }

        let relations: Vec<Relation> = self.relations.into_iter().map(|p| p.relation).collect();
        debug!(
            tables = self.tables.len(),
            relations = relations.len(),
            title_attributes = self.title.len();
            "Diagram elaborated"
        );

        let diagram = Diagram::new(self.title, self.tables, relations);
        let warnings = self.diagnostics.finish()?;
        Ok(Elaboration { diagram, warnings })
    }

    fn take_attribute(&mut self) -> Option<(Spanned<String>, String)> {
        Some((self.key.take()?, self.value.take()?))
    }
}

/// Log `diagnostic` at its severity and keep it for the final report.
fn report(diagnostics: &mut DiagnosticCollector, diagnostic: Diagnostic) {
    let level = log::Level::from(diagnostic.severity());
    log!(level, code:? = diagnostic.code(); "{}", diagnostic.message());
    diagnostics.emit(diagnostic);
}

/// Insert with last-write-wins semantics, warning about the overwrite.
fn insert_attribute(
    attributes: &mut Attributes,
    (key, value): (Spanned<String>, String),
    diagnostics: &mut DiagnosticCollector,
) {
    if attributes.insert(key.inner().as_str(), value).is_some() {
        report(
            diagnostics,
            Diagnostic::warning(format!("attribute `{}` is set more than once", *key))
                .with_code(ErrorCode::E203)
                .with_label(key.span(), "this value replaces the earlier one")
                .with_help("remove one of the duplicate keys"),
        );
    }
}

fn spanned_id(name: Spanned<&str>) -> Spanned<Id> {
    name.map(|text| Id::new(text))
}

impl Actions for Builder {
    fn error(&mut self, offset: usize, buffer: &Buffer) {
        let code = if offset == 0 {
            ErrorCode::E102
        } else {
            ErrorCode::E101
        };
        let rest = Span::new(offset..buffer.len().max(offset));
        let diagnostic = match &self.failure {
            Some(failure) => failure
                .to_diagnostic(code)
                .with_secondary_label(rest, "unparsed input starts here"),
            None => Diagnostic::error("unexpected input")
                .with_code(code)
                .with_label(rest, "could not be parsed"),
        };

        let diagnostic = if self.cfg.strict {
            diagnostic
        } else {
            diagnostic.into_warning()
        };
        report(&mut self.diagnostics, diagnostic);
    }

    fn clear_current(&mut self) {
        self.current_table = None;
        self.column_open = false;
    }

    fn begin_table(&mut self, name: Spanned<&str>) {
        let id = Id::new(&name);
        self.column_open = false;

        if let Some(&(index, first)) = self.table_index.get(&id) {
            report(
                &mut self.diagnostics,
                Diagnostic::warning(format!("table `{id}` is declared more than once"))
                    .with_code(ErrorCode::E204)
                    .with_label(name.span(), "declared again here")
                    .with_secondary_label(first, "first declared here")
                    .with_help("columns and attributes are merged into the first declaration"),
            );
            self.current_table = Some(index);
            return;
        }

        let index = self.tables.len();
        self.tables.push(Table::new(id));
        self.table_index.insert(id, (index, name.span()));
        self.current_table = Some(index);
    }

    fn begin_column(&mut self, name: Spanned<&str>) {
        let Some(index) = self.current_table else {
            self.column_open = false;
            report(
                &mut self.diagnostics,
                Diagnostic::warning(format!("column `{}` is not inside a table", *name))
                    .with_code(ErrorCode::E200)
                    .with_label(name.span(), "ignored")
                    .with_help("a blank line ends a table; remove it or declare a table first"),
            );
            return;
        };
        self.tables[index].push_column(Column::new(Id::new(&name)));
        self.column_open = true;
    }

    fn commit_relation(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        match pending {
            PendingRelation {
                left: Some(left),
                left_cardinality: Some(left_cardinality),
                right: Some(right),
                right_cardinality: Some(right_cardinality),
                attributes,
            } => {
                let relation =
                    Relation::new(*left, left_cardinality, *right, right_cardinality)
                        .with_attributes(attributes);
                self.relations.push(PlacedRelation {
                    relation,
                    left: left.span(),
                    right: right.span(),
                });
            }
            incomplete => {
                let span = incomplete
                    .left
                    .or(incomplete.right)
                    .map(|name| name.span())
                    .unwrap_or_default();
                report(
                    &mut self.diagnostics,
                    Diagnostic::warning("relation is missing an endpoint or a cardinality")
                        .with_code(ErrorCode::E201)
                        .with_label(span, "incomplete relation"),
                );
            }
        }
    }

    fn set_relation_left(&mut self, name: Spanned<&str>) {
        self.pending.left = Some(spanned_id(name));
    }

    fn set_relation_right(&mut self, name: Spanned<&str>) {
        self.pending.right = Some(spanned_id(name));
    }

    fn set_cardinality_left(&mut self, symbol: Spanned<&str>) {
        self.pending.left_cardinality = symbol.parse().ok();
    }

    fn set_cardinality_right(&mut self, symbol: Spanned<&str>) {
        self.pending.right_cardinality = symbol.parse().ok();
    }

    fn add_title_attribute(&mut self) {
        if let Some(attribute) = self.take_attribute() {
            insert_attribute(&mut self.title, attribute, &mut self.diagnostics);
        }
    }

    fn add_table_attribute(&mut self) {
        let Some(attribute) = self.take_attribute() else {
            return;
        };
        if let Some(index) = self.current_table {
            insert_attribute(
                self.tables[index].attributes_mut(),
                attribute,
                &mut self.diagnostics,
            );
        }
    }

    fn add_column_attribute(&mut self) {
        let Some(attribute) = self.take_attribute() else {
            return;
        };
        // attributes of an ignored column are dropped with it
        if !self.column_open {
            return;
        }
        let column = self
            .current_table
            .and_then(|index| self.tables[index].last_column_mut());
        if let Some(column) = column {
            insert_attribute(column.attributes_mut(), attribute, &mut self.diagnostics);
        }
    }

    fn add_relation_attribute(&mut self) {
        if let Some(attribute) = self.take_attribute() {
            insert_attribute(
                &mut self.pending.attributes,
                attribute,
                &mut self.diagnostics,
            );
        }
    }

    fn stage_key(&mut self, key: Spanned<&str>) {
        self.key = Some(key.map(|text| text.to_string()));
    }

    fn stage_value(&mut self, value: Spanned<&str>) {
        self.value = Some(value.to_string());
    }
}
