//! Parse-tree reconstruction from the flat span list.
//!
//! The span list is post-order, so a node's descendants are exactly the
//! preceding spans its interval contains. One pass with an explicit stack
//! rebuilds the nesting. The tree is only used for diagnostic dumps.

use std::fmt::{self, Write};

use crate::{buffer::Buffer, recorder::Match, rule::Rule, span::Span};

/// A node of the reconstructed parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    rule: Rule,
    span: Span,
    children: Vec<Node>,
}

impl Node {
    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Children in source order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Write this node and its descendants, one line per node.
    ///
    /// Each line is indented one space per level and reads `rule "text"`.
    pub fn dump(&self, buffer: &Buffer, out: &mut impl Write) -> fmt::Result {
        self.dump_at(buffer, out, 0)
    }

    fn dump_at(&self, buffer: &Buffer, out: &mut impl Write, depth: usize) -> fmt::Result {
        writeln!(
            out,
            "{:depth$}{} {:?}",
            "",
            self.rule,
            buffer.text(self.span),
        )?;
        for child in &self.children {
            child.dump_at(buffer, out, depth + 1)?;
        }
        Ok(())
    }
}

/// Rebuild the forest of nodes from a post-order span list.
///
/// Zero-width spans are skipped. A complete parse yields a single root.
pub fn build_forest(matches: &[Match]) -> Vec<Node> {
    let mut stack: Vec<Node> = Vec::new();

    for m in matches.iter().filter(|m| !m.span().is_empty()) {
        let span = m.span();
        let first_child = stack
            .iter()
            .rposition(|node| !span.contains(node.span))
            .map_or(0, |index| index + 1);
        let children = stack.split_off(first_child);

        stack.push(Node {
            rule: m.rule(),
            span,
            children,
        });
    }

    stack
}

/// Dump every root of `forest` into a string.
pub fn dump_forest(forest: &[Node], buffer: &Buffer) -> String {
    let mut out = String::new();
    for node in forest {
        // writing into a String cannot fail
        let _ = node.dump(buffer, &mut out);
    }
    out
}
