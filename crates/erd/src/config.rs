//! Configuration types for ERD processing.
//!
//! All types implement [`serde::Deserialize`] and every field has a default,
//! so a configuration file only needs the keys it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and format settings.
//! - [`ParserConfig`] - Error policy and span-recorder sizing.
//! - [`FormatConfig`] - Layout of regenerated DSL source.
//!
//! # Example
//!
//! ```
//! # use erd::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.parser().strict());
//! assert_eq!(config.format().indent(), 2);
//! ```

use serde::Deserialize;

use erd_core::format::{FormatOptions, QuoteStyle};
use erd_parser::{ElaborateConfig, ParseOptions};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Source formatting configuration section.
    #[serde(default)]
    format: FormatConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parser: ParserConfig, format: FormatConfig) -> Self {
        Self { parser, format }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the format configuration.
    pub fn format(&self) -> &FormatConfig {
        &self.format
    }
}

/// Parser settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Treat unparseable input as an error rather than a warning.
    strict: bool,

    /// Initial capacity of the span recorder.
    span_capacity: usize,
}

impl ParserConfig {
    pub fn new(strict: bool, span_capacity: usize) -> Self {
        Self {
            strict,
            span_capacity,
        }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn span_capacity(&self) -> usize {
        self.span_capacity
    }

    /// The per-parse options these settings select.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new().with_span_capacity(self.span_capacity)
    }

    pub fn elaborate_config(&self) -> ElaborateConfig {
        ElaborateConfig::new(self.strict)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new(true, 64)
    }
}

/// When attribute values are written with quotes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteValues {
    /// Only values that cannot be written bare.
    #[default]
    Auto,
    /// Every value.
    Always,
}

impl From<QuoteValues> for QuoteStyle {
    fn from(value: QuoteValues) -> Self {
        match value {
            QuoteValues::Auto => QuoteStyle::Auto,
            QuoteValues::Always => QuoteStyle::Always,
        }
    }
}

/// Settings for regenerated DSL source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Spaces in front of each column line.
    indent: usize,

    /// Quoting policy for attribute values.
    quote_values: QuoteValues,
}

impl FormatConfig {
    pub fn new(indent: usize, quote_values: QuoteValues) -> Self {
        Self {
            indent,
            quote_values,
        }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn quote_values(&self) -> QuoteValues {
        self.quote_values
    }

    /// The writer options these settings select.
    pub fn options(&self) -> FormatOptions {
        FormatOptions::new(self.indent, self.quote_values.into())
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new(2, QuoteValues::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.parser().strict());
        assert_eq!(config.parser().span_capacity(), 64);
        assert_eq!(config.format().quote_values(), QuoteValues::Auto);
        assert_eq!(config.format().options(), FormatOptions::default());
    }

    #[test]
    fn test_parser_sections_map_to_parser_options() {
        let parser = ParserConfig::new(false, 8);
        assert_eq!(parser.parse_options().span_capacity(), 8);
        assert!(!parser.elaborate_config().strict);
    }

    #[test]
    fn test_quote_values_map_to_quote_style() {
        let format = FormatConfig::new(4, QuoteValues::Always);
        assert_eq!(format.options(), FormatOptions::new(4, QuoteStyle::Always));
    }
}
