//! Configuration layer for the `dynflags` inspector.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML schema parsing ([`Schema`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Schema template generation ([`write_default_schema`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Options are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **Schema file** (only `behavior` can be set there)
//! 3. **Built-in defaults**
//!
//! The schema itself is required and can only come from `--schema`.

mod cli;
pub mod defaults;
mod error;
mod schema;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{BehaviorArg, Cli, Command, FormatArg};
pub use error::{ConfigError, field};
pub use schema::{DefaultValue, FlagEntry, GroupEntry, Literal, Schema, default_schema_template};
pub use validated::{ValidatedConfig, write_default_schema};
