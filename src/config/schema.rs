//! TOML schema file parsing.
//!
//! A schema declares the groups and flags the inspector registers with the
//! engine, plus optional usage text and a default unknown-flag behavior.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::engine::{Engine, ParseBehavior};
use crate::value::FlagType;

use super::ConfigError;

/// Root structure of a schema file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    /// Usage title
    pub title: Option<String>,

    /// Usage description, printed after the title
    pub description: Option<String>,

    /// Usage epilog, printed after all groups
    pub epilog: Option<String>,

    /// Unknown-flag behavior: "continue", "exit" or "unknown"
    pub behavior: Option<ParseBehavior>,

    /// Group templates, in declaration order
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupEntry>,
}

/// A `[[group]]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    /// Group name, the first path segment
    pub name: String,

    /// Heading override for usage output
    pub usage: Option<String>,

    /// Flags, in declaration order
    #[serde(default, rename = "flag")]
    pub flags: Vec<FlagEntry>,
}

/// A `[[group.flag]]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagEntry {
    /// Flag name, the last path segment
    pub name: String,

    /// Declared type, e.g. "duration" or "int_slice"
    #[serde(rename = "type")]
    pub kind: FlagType,

    /// Default value; an array for slice flags
    pub default: Option<DefaultValue>,

    /// Usage text
    #[serde(default)]
    pub usage: String,

    /// Placeholder shown in usage output
    pub metavar: Option<String>,
}

/// A default given as a single literal or an array of literals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// `default = "5s"`
    One(Literal),
    /// `default = ["80", "443"]`
    Many(Vec<Literal>),
}

/// A TOML scalar used as default text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// A string, converted by the flag's type.
    Text(String),
    /// A TOML integer.
    Integer(i64),
    /// A TOML float.
    Float(f64),
    /// A TOML boolean.
    Boolean(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl DefaultValue {
    /// The default as the texts handed to the flag's parser.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        match self {
            Self::One(literal) => vec![literal.to_string()],
            Self::Many(literals) => literals.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Schema {
    /// Loads a schema from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses a schema from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Registers every group and flag, and the usage text, with `engine`.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is invalid or repeated, or a default does
    /// not convert to its flag's type.
    pub fn register(&self, engine: &mut Engine) -> Result<(), ConfigError> {
        if let Some(title) = &self.title {
            engine.title(title.as_str());
        }
        if let Some(description) = &self.description {
            engine.description(description.as_str());
        }
        if let Some(epilog) = &self.epilog {
            engine.epilog(epilog.as_str());
        }

        for entry in &self.groups {
            let group = engine.try_group(&entry.name)?;
            if let Some(usage) = &entry.usage {
                group.set_usage(usage.as_str());
            }

            for flag in &entry.flags {
                let defaults = flag
                    .default
                    .as_ref()
                    .map(DefaultValue::texts)
                    .unwrap_or_default();
                let registered =
                    group.define_text(&flag.name, flag.kind, defaults.as_slice(), &flag.usage)?;
                if let Some(metavar) = &flag.metavar {
                    registered.set_metavar(metavar.as_str());
                }
            }

            tracing::debug!(
                group = %entry.name,
                flags = entry.flags.len(),
                "Registered group"
            );
        }

        Ok(())
    }
}

/// Generates a template schema file with comments.
#[must_use]
pub fn default_schema_template() -> String {
    r#"# dynflags schema
#
# Declares the groups and flags accepted on the command line as
#   --<group>.<identifier>.<flag>=<value>
# Every identifier used under a group gets its own set of values.

# Usage text (optional)
title = "Usage: dynflags --schema dynflags.toml -- [FLAGS]"
# description = "Probe targets, one per identifier."
# epilog = "Example: --http.api.method=POST --tcp.db.address=localhost:5432"

# How to treat flags not declared below: "continue", "exit" or "unknown"
# (default: exit, can be overridden by --behavior CLI flag)
behavior = "exit"

[[group]]
name = "http"
# Heading in usage output (default: upper-cased group name)
usage = "HTTP targets"

[[group.flag]]
name = "method"
# Types: string, bool, int, float, duration, url, ip,
# or any of them with a "_slice" suffix for repeatable flags
type = "string"
default = "GET"
usage = "HTTP method"

[[group.flag]]
name = "timeout"
type = "duration"
default = "5s"
usage = "Request timeout"

[[group.flag]]
name = "header"
type = "string_slice"
usage = "Extra request header (repeatable)"
metavar = "HEADER"

[[group]]
name = "tcp"

[[group.flag]]
name = "address"
type = "string"
usage = "Address to dial"
metavar = "HOST:PORT"

[[group.flag]]
name = "retries"
type = "int"
default = 3
usage = "Connection attempts"
"#
    .to_string()
}
