//! Relationship multiplicity markers.
//!
//! A relation end carries one of four cardinalities, written in the DSL as a
//! single character on either side of `--`:
//!
//! | Symbol | Variant | Label |
//! |---|---|---|
//! | `0` | [`Cardinality::Zero`] | `0..1` |
//! | `1` | [`Cardinality::One`] | `1` |
//! | `*` | [`Cardinality::Many`] | `0..N` |
//! | `+` | [`Cardinality::OneOrMore`] | `1..N` |

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Multiplicity of one end of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// `0`: zero or one.
    Zero,
    /// `1`: exactly one.
    One,
    /// `*`: zero or more.
    Many,
    /// `+`: one or more.
    OneOrMore,
}

/// Error returned when text is not one of the four cardinality symbols.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cardinality `{0}`, expected one of `0`, `1`, `*`, `+`")]
pub struct CardinalityError(pub String);

impl Cardinality {
    /// All cardinalities in symbol order.
    pub const ALL: [Cardinality; 4] = [
        Cardinality::Zero,
        Cardinality::One,
        Cardinality::Many,
        Cardinality::OneOrMore,
    ];

    /// The DSL symbol of this cardinality.
    pub fn symbol(self) -> char {
        match self {
            Cardinality::Zero => '0',
            Cardinality::One => '1',
            Cardinality::Many => '*',
            Cardinality::OneOrMore => '+',
        }
    }

    /// Human readable range used when describing a relation end.
    pub fn label(self) -> &'static str {
        match self {
            Cardinality::Zero => "0..1",
            Cardinality::One => "1",
            Cardinality::Many => "0..N",
            Cardinality::OneOrMore => "1..N",
        }
    }

    /// Parse a single symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }
}

impl FromStr for Cardinality {
    type Err = CardinalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => {
                Self::from_symbol(symbol).ok_or_else(|| CardinalityError(s.to_string()))
            }
            _ => Err(CardinalityError(s.to_string())),
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
