//! ERD Core Types and Definitions
//!
//! This crate provides the domain model of the ERD diagram language. It
//! includes:
//!
//! - **Identifiers**: String-interned names ([`identifier::Id`])
//! - **Cardinality**: Relation multiplicities ([`cardinality::Cardinality`])
//! - **Attributes**: Insertion-ordered key-value metadata ([`attributes::Attributes`])
//! - **Semantic**: Diagram, table, column and relation types ([`semantic`] module)
//! - **Format**: Writer back to the ERD surface syntax ([`format`] module)

pub mod attributes;
pub mod cardinality;
pub mod format;
pub mod identifier;
pub mod semantic;
