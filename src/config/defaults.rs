//! Default values for inspector options.

use crate::engine::ParseBehavior;
use crate::report::Format;

/// Default output path of `dynflags init`.
pub const SCHEMA_FILE: &str = "dynflags.toml";

/// Unknown-flag behavior when neither the CLI nor the schema sets one.
pub const BEHAVIOR: ParseBehavior = ParseBehavior::ExitOnError;

/// Output format when the CLI does not set one.
pub const FORMAT: Format = Format::Text;
