//! Plain-text overview of a diagram.

use std::fmt::{self, Write};

use erd_core::{attributes::Attributes, semantic::Diagram};

/// Render `diagram` as an indented outline.
///
/// ```text
/// title
///   label = My ERD
/// tables (1)
///   Person
///     name
///     age (type = int)
/// relations (1)
///   Person [0..N] -- [1] Car
/// ```
pub fn summarize(diagram: &Diagram) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_summary(diagram, &mut out);
    out
}

fn write_summary(diagram: &Diagram, out: &mut impl Write) -> fmt::Result {
    if !diagram.title().is_empty() {
        writeln!(out, "title")?;
        for (key, value) in diagram.title().iter() {
            writeln!(out, "  {key} = {value}")?;
        }
    }

    writeln!(out, "tables ({})", diagram.tables().len())?;
    for table in diagram.tables() {
        writeln!(out, "  {}{}", table.name(), inline(table.attributes()))?;
        for column in table.columns() {
            writeln!(out, "    {}{}", column.name(), inline(column.attributes()))?;
        }
    }

    writeln!(out, "relations ({})", diagram.relations().len())?;
    for relation in diagram.relations() {
        writeln!(
            out,
            "  {} [{}] -- [{}] {}{}",
            relation.left(),
            relation.left_cardinality().label(),
            relation.right_cardinality().label(),
            relation.right(),
            inline(relation.attributes()),
        )?;
    }
    Ok(())
}

fn inline(attributes: &Attributes) -> String {
    if attributes.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = attributes
        .iter()
        .map(|(key, value)| format!("{key} = {value}"))
        .collect();
    format!(" ({})", pairs.join(", "))
}

#[cfg(test)]
mod tests {
    use erd_core::{
        cardinality::Cardinality,
        identifier::Id,
        semantic::{Column, Relation, Table},
    };

    use super::*;

    #[test]
    fn test_summary_lists_everything() {
        let person = Table::new(Id::new("Person"))
            .with_column(Column::new(Id::new("name")))
            .with_column(
                Column::new(Id::new("age")).with_attributes([("type", "int")].into_iter().collect()),
            );
        let relation = Relation::new(
            Id::new("Person"),
            Cardinality::Many,
            Id::new("Car"),
            Cardinality::One,
        );
        let diagram = Diagram::new(
            [("label", "My ERD")].into_iter().collect(),
            vec![person],
            vec![relation],
        );

        assert_eq!(
            summarize(&diagram),
            "title\n  label = My ERD\ntables (1)\n  Person\n    name\n    age (type = int)\n\
             relations (1)\n  Person [0..N] -- [1] Car\n"
        );
    }

    #[test]
    fn test_empty_diagram_has_no_title_block() {
        let diagram = Diagram::new(Attributes::new(), Vec::new(), Vec::new());
        assert_eq!(summarize(&diagram), "tables (0)\nrelations (0)\n");
    }
}
