//! dynflags: dynamic hierarchical command-line flags
//!
//! Entry point for the dynflags inspector.

use dynflags::config::{Cli, Command, ValidatedConfig, write_default_schema};
use dynflags::{Engine, Report};
use std::process::ExitCode;

mod app;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    let mut engine = match config.build_engine() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return exit_code::CONFIG_ERROR;
        }
    };

    if config.usage_only {
        return print_usage(&mut engine);
    }

    run(&mut engine, &config)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_schema(output) {
        Ok(()) => {
            println!("Schema template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Prints the usage text to stdout.
fn print_usage(engine: &mut Engine) -> ExitCode {
    engine.set_output(std::io::stdout());
    match engine.usage() {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("Failed to write usage: {e}");
            exit_code::output_error()
        }
    }
}

/// Parses the configured arguments and prints the report.
fn run(engine: &mut Engine, config: &ValidatedConfig) -> ExitCode {
    if let Err(e) = engine.parse(config.args.iter().cloned()) {
        eprintln!("Error: {e}\n");
        if let Err(e) = engine.usage() {
            tracing::warn!("Failed to write usage: {e}");
        }
        return exit_code::parse_error();
    }

    match Report::new(engine).render(config.format) {
        Ok(text) => {
            print!("{text}");
            exit_code::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to render report: {e}");
            exit_code::output_error()
        }
    }
}
