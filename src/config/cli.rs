//! CLI argument parsing using clap.
//!
//! Defines the inspector's own options. Everything after `--` is handed to
//! the flag engine untouched.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::engine::ParseBehavior;
use crate::report::Format;

use super::defaults;

/// dynflags: inspect dynamic hierarchical flags
///
/// Declares groups and flags from a TOML schema, parses
/// `--<group>.<identifier>.<flag>=<value>` arguments against it and prints
/// one configuration per identifier.
#[derive(Debug, Parser)]
#[command(name = "dynflags")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// TOML schema declaring groups and flags (required for run mode)
    #[arg(long, short)]
    pub schema: Option<PathBuf>,

    /// How to treat flags the schema does not declare
    #[arg(long, value_enum)]
    pub behavior: Option<BehaviorArg>,

    /// Output format for parse results
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Print the usage text for the schema and exit
    #[arg(long)]
    pub usage: bool,

    /// Sort groups and flags by name in usage output
    #[arg(long)]
    pub sort: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Arguments to parse, given after `--`
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Subcommands for dynflags
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a template schema file
    Init {
        /// Output path for the schema file
        #[arg(long, short, default_value = defaults::SCHEMA_FILE)]
        output: PathBuf,
    },
}

/// Unknown-flag behavior argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BehaviorArg {
    /// Skip unknown flags and list them as unparsed
    #[value(name = "continue")]
    Continue,
    /// Fail on the first unknown flag
    #[value(name = "exit")]
    Exit,
    /// Record unknown flags as raw strings
    #[value(name = "unknown")]
    Unknown,
}

impl From<BehaviorArg> for ParseBehavior {
    fn from(arg: BehaviorArg) -> Self {
        match arg {
            BehaviorArg::Continue => Self::ContinueOnError,
            BehaviorArg::Exit => Self::ExitOnError,
            BehaviorArg::Unknown => Self::ParseUnknown,
        }
    }
}

/// Output format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Aligned text
    #[value(name = "text")]
    Text,
    /// Pretty-printed JSON
    #[value(name = "json")]
    Json,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
