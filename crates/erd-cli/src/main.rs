//! ERD CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use erd_cli::{Args, ErdError, error_adapter::to_reports};

/// Install `env_logger` at the level named on the command line.
///
/// # Arguments
///
/// * `level` - A `log` level name; anything unrecognized falls back to `warn`
fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
    debug!(filter:?; "Logger initialized");
}

/// Render every diagnostic carried by `err` as a graphical report.
///
/// # Arguments
///
/// * `err` - The error returned by [`erd_cli::run`]
fn report_failure(err: &ErdError) {
    let handler = GraphicalReportHandler::new();

    for report in to_reports(err) {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, &report) {
            Ok(()) => error!("{rendered}"),
            // plain display still names the code and message
            Err(_) => error!("{report}"),
        }
    }
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);

    info!(input = args.input, emit:? = args.emit; "Starting ERD");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = erd_cli::run(&args) {
        report_failure(&err);
        process::exit(1);
    }

    info!("Completed successfully");
}
