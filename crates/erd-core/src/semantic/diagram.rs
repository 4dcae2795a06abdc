//! The root diagram type.

use crate::{
    attributes::Attributes,
    semantic::element::{Relation, Table},
};

/// A complete entity-relationship diagram.
///
/// Holds the title attributes, the tables in declaration order and the
/// relations in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagram {
    title: Attributes,
    tables: Vec<Table>,
    relations: Vec<Relation>,
}

impl Diagram {
    /// Create a new Diagram.
    pub fn new(title: Attributes, tables: Vec<Table>, relations: Vec<Relation>) -> Self {
        Self {
            title,
            tables,
            relations,
        }
    }

    /// Title attributes (`title {label: "..."}`).
    pub fn title(&self) -> &Attributes {
        &self.title
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Find the first table declared with `name`.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name() == name)
    }

    /// True when the diagram has no title attributes, tables or relations.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.tables.is_empty() && self.relations.is_empty()
    }
}
