//! Process-level helpers for the inspector binary: exit statuses, logging
//! and hints for configuration mistakes.

use dynflags::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Exit statuses reported by the inspector.
pub mod exit_code {
    use std::process::ExitCode;

    /// Arguments parsed and the report (or usage) was printed.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// The schema could not be found, read or registered.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// The flag arguments were rejected by the engine.
    pub fn parse_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Writing the report or usage text failed.
    pub fn output_error() -> ExitCode {
        ExitCode::from(3)
    }
}

/// Points the user at `dynflags init` when no usable schema file was given.
pub fn print_config_hint(error: &ConfigError) {
    if matches!(
        error,
        ConfigError::MissingRequired {
            field: field::SCHEMA,
            ..
        } | ConfigError::FileRead { .. }
    ) {
        eprintln!("\nRun 'dynflags init' to write a starter schema, then pass it with --schema.");
    }
}

/// Installs a stderr logger. `RUST_LOG` takes precedence over `--verbose`.
pub fn setup_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
