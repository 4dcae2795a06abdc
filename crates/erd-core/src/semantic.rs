//! Semantic diagram model types.
//!
//! This module contains the representation of an ERD after parsing and
//! elaboration. The model is what the action dispatcher drives: every table,
//! column, relation and attribute ends up here in declaration order.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ grammar (backtracking engine)
//! Span List - flat post-order record of the winning parse
//!     ↓ dispatch
//! Semantic Model (these types)
//!     ↓ format
//! Normalized Source
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - The root [`Diagram`]
//! - [`element`] - [`Table`], [`Column`] and [`Relation`]

pub mod diagram;
pub mod element;

pub use diagram::*;
pub use element::*;
