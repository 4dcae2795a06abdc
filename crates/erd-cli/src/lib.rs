//! ERD CLI library
//!
//! This module contains the core CLI logic for the ERD diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Emit};
pub use erd::ErdError;

use std::{
    fs,
    io::{self, Write},
};

use log::{debug, info};

use erd::DiagramBuilder;

/// Run the ERD CLI application
///
/// Processes the input file according to `args.emit` and writes the result
/// to `args.output`, or to stdout when no output path is given.
///
/// # Errors
///
/// Returns `ErdError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Formatting errors
pub fn run(args: &Args) -> Result<(), ErdError> {
    info!(
        input_path = args.input,
        emit:? = args.emit;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let output = match args.emit {
        Emit::Model => {
            let elaboration = builder.parse(&source)?;
            builder.summary(elaboration.diagram())
        }
        Emit::Tree => builder.syntax_tree(&source)?,
        Emit::Source => {
            let elaboration = builder.parse(&source)?;
            builder.format_source(elaboration.diagram())?
        }
    };
    debug!(bytes = output.len(); "Output generated");

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path; "Output written");
        }
        None => io::stdout().lock().write_all(output.as_bytes())?,
    }

    Ok(())
}
