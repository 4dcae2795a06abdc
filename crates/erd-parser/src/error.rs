//! Diagnostics for the ERD parser.
//!
//! Engine-level failures are plain values ([`crate::SyntaxError`]); everything
//! reported to a user goes through [`Diagnostic`], which carries a severity,
//! an optional [`ErrorCode`], labeled spans and help text. A failed parse
//! returns a [`ParseError`] wrapping one or more diagnostics.
//!
//! # Example
//!
//! ```
//! # use erd_parser::error::{Diagnostic, ErrorCode};
//! # use erd_parser::Span;
//!
//! let diag = Diagnostic::warning("table `Person` is declared more than once")
//!     .with_code(ErrorCode::E204)
//!     .with_label(Span::new(20..26), "declared again here")
//!     .with_secondary_label(Span::new(1..7), "first declared here");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
