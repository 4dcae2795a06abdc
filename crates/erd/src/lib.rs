//! ERD - A small language for entity-relationship diagrams.
//!
//! Parsing, inspection and source formatting for the ERD diagram language.
//! Tables, their columns and the relations between them are declared in a
//! line-oriented text DSL.

pub mod config;

mod error;
mod summary;

pub use erd_core::{attributes, cardinality, identifier, semantic};
pub use erd_parser::Elaboration;

pub use error::ErdError;

use log::{debug, info, trace, warn};

use erd_core::format;
use erd_parser::error::{ErrorCode, ParseError};

use config::AppConfig;

/// Builder for processing ERD diagrams.
///
/// # Examples
///
/// ```rust
/// use erd::{DiagramBuilder, config::AppConfig};
///
/// let source = "[Person]\nname\n\n[Car]\n\nPerson *--1 Car\n";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse source to semantic model
/// let elaboration = builder.parse(source).expect("Failed to parse");
/// assert_eq!(elaboration.diagram().tables().len(), 2);
///
/// // Regenerate normalized source
/// let normalized = builder.format_source(elaboration.diagram()).expect("Failed to format");
/// assert!(normalized.starts_with("[Person]"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse source code into a semantic diagram.
    ///
    /// Advisory diagnostics are returned alongside the diagram and logged at
    /// `warn` level.
    ///
    /// # Errors
    ///
    /// Returns [`ErdError::Parse`] when the source contains unparseable input
    /// and the parser runs in strict mode.
    pub fn parse(&self, source: &str) -> Result<Elaboration, ErdError> {
        info!("Parsing diagram");

        let parser = self.config.parser();
        let elaboration =
            erd_parser::parse_diagram(source, parser.parse_options(), parser.elaborate_config())
                .map_err(|err| ErdError::new_parse_error(err, source))?;

        debug!(
            tables = elaboration.diagram().tables().len(),
            relations = elaboration.diagram().relations().len(),
            warnings = elaboration.warnings().len();
            "Diagram parsed successfully"
        );
        for warning in elaboration.warnings() {
            warn!(warning:%; "Diagram accepted with warning");
        }
        trace!(diagram:? = elaboration.diagram(); "Parsed diagram");

        Ok(elaboration)
    }

    /// Dump the syntax tree of `source`, one node per line.
    ///
    /// The dump shows the winning parse path, including any `garbage`
    /// capture, whatever the strictness setting.
    ///
    /// # Errors
    ///
    /// Returns [`ErdError::Parse`] when the start rule does not match.
    pub fn syntax_tree(&self, source: &str) -> Result<String, ErdError> {
        info!("Dumping syntax tree");

        let tree = erd_parser::parse(source, self.config.parser().parse_options()).map_err(|err| {
            ErdError::new_parse_error(ParseError::from(err.to_diagnostic(ErrorCode::E100)), source)
        })?;

        let dump = tree.dump();
        debug!(spans = tree.matches().len(), outcome:? = tree.outcome(); "Syntax tree built");
        Ok(dump)
    }

    /// Write `diagram` back as DSL source using the configured layout.
    ///
    /// # Errors
    ///
    /// Returns [`ErdError::Format`] when a name or value has no
    /// representation in the surface syntax.
    pub fn format_source(&self, diagram: &semantic::Diagram) -> Result<String, ErdError> {
        info!("Formatting diagram source");

        let options = self.config.format().options();
        let source = format::write_source(diagram, &options)?;

        trace!(source; "Formatted source");
        Ok(source)
    }

    /// Outline the title, tables and relations of `diagram`.
    pub fn summary(&self, diagram: &semantic::Diagram) -> String {
        summary::summarize(diagram)
    }
}
