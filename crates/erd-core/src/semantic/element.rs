//! Diagram element types for the semantic model.

use std::fmt;

use crate::{attributes::Attributes, cardinality::Cardinality, identifier::Id};

/// A table (entity) with its own attributes and ordered columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: Id,
    attributes: Attributes,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table.
    pub fn new(name: Id) -> Self {
        Self {
            name,
            attributes: Attributes::new(),
            columns: Vec::new(),
        }
    }

    /// Set the table attributes, replacing any existing ones.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Append a column, returning the table for chaining.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Append a column and return a mutable reference to it.
    pub fn push_column(&mut self, column: Column) -> &mut Column {
        self.columns.push(column);
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    pub fn last_column_mut(&mut self) -> Option<&mut Column> {
        self.columns.last_mut()
    }

    /// Find a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)
    }
}

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: Id,
    attributes: Attributes,
}

impl Column {
    pub fn new(name: Id) -> Self {
        Self {
            name,
            attributes: Attributes::new(),
        }
    }

    /// Set the column attributes, replacing any existing ones.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A relation between two tables, each end carrying a [`Cardinality`].
///
/// Endpoint names are not required to refer to declared tables; callers that
/// care can check with [`Diagram::table`](crate::semantic::Diagram::table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    left: Id,
    left_cardinality: Cardinality,
    right: Id,
    right_cardinality: Cardinality,
    attributes: Attributes,
}

impl Relation {
    /// Create a new relation without attributes.
    pub fn new(
        left: Id,
        left_cardinality: Cardinality,
        right: Id,
        right_cardinality: Cardinality,
    ) -> Self {
        Self {
            left,
            left_cardinality,
            right,
            right_cardinality,
            attributes: Attributes::new(),
        }
    }

    /// Set the relation attributes, replacing any existing ones.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn left(&self) -> Id {
        self.left
    }

    pub fn left_cardinality(&self) -> Cardinality {
        self.left_cardinality
    }

    pub fn right(&self) -> Id {
        self.right
    }

    pub fn right_cardinality(&self) -> Cardinality {
        self.right_cardinality
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}--{} {}",
            self.left, self.left_cardinality, self.right_cardinality, self.right
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_columns_keep_order() {
        let mut table = Table::new(Id::new("Person"));
        table.push_column(Column::new(Id::new("name")));
        table
            .push_column(Column::new(Id::new("age")))
            .attributes_mut()
            .insert("type", "int");

        let names: Vec<String> = table.columns().iter().map(|c| c.to_string()).collect();
        assert_eq!(names, ["name", "age"]);
        assert_eq!(
            table.column("age").and_then(|c| c.attributes().get("type")),
            Some("int")
        );
        assert!(table.column("height").is_none());
    }

    #[test]
    fn test_relation_display() {
        let relation = Relation::new(
            Id::new("Person"),
            Cardinality::Many,
            Id::new("Car"),
            Cardinality::One,
        );
        assert_eq!(relation.to_string(), "Person *--1 Car");
    }

    #[test]
    fn test_table_display() {
        assert_eq!(Table::new(Id::new("Person")).to_string(), "[Person]");
    }
}
