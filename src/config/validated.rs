//! Validated configuration after merging CLI and schema sources.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::engine::{Engine, ParseBehavior};
use crate::report::Format;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::schema::{Schema, default_schema_template};

/// Fully validated inspector configuration.
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and an
/// optional schema, or [`ValidatedConfig::load`] to read the schema named
/// by `--schema`.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Where the schema was loaded from, if it came from a file
    pub schema_path: Option<PathBuf>,

    /// Groups and flags to register (required)
    pub schema: Schema,

    /// Unknown-flag behavior
    pub behavior: ParseBehavior,

    /// Output format for parse results
    pub format: Format,

    /// Print usage and exit instead of parsing
    pub usage_only: bool,

    /// Sort groups and flags in usage output
    pub sort: bool,

    /// Verbose logging enabled
    pub verbose: bool,

    /// Arguments handed to the engine
    pub args: Vec<String>,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schema_path = self
            .schema_path
            .as_ref()
            .map_or_else(|| "inline".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ schema: {}, groups: {}, behavior: {}, format: {}, usage_only: {}, \
             args: {} }}",
            schema_path,
            self.schema.groups.len(),
            self.behavior,
            self.format,
            self.usage_only,
            self.args.len(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and a schema.
    ///
    /// CLI arguments take precedence over schema values, which take
    /// precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if no schema is given.
    pub fn from_raw(cli: &Cli, schema: Option<&Schema>) -> Result<Self, ConfigError> {
        let schema = schema.cloned().ok_or_else(|| {
            ConfigError::missing(
                field::SCHEMA,
                "Use --schema <FILE> to declare groups and flags",
            )
        })?;

        let behavior = cli
            .behavior
            .map(ParseBehavior::from)
            .or(schema.behavior)
            .unwrap_or(defaults::BEHAVIOR);

        let format = cli.format.map_or(defaults::FORMAT, Format::from);

        Ok(Self {
            schema_path: cli.schema.clone(),
            schema,
            behavior,
            format,
            usage_only: cli.usage,
            sort: cli.sort,
            verbose: cli.verbose,
            args: cli.args.clone(),
        })
    }

    /// Loads the schema named by `--schema` and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is missing, unreadable or invalid.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let schema = if let Some(ref path) = cli.schema {
            Some(Schema::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, schema.as_ref())
    }

    /// Creates an engine with every schema group registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema declares an invalid or repeated name,
    /// or a default that does not convert to its flag's type.
    pub fn build_engine(&self) -> Result<Engine, ConfigError> {
        let mut engine = Engine::new(self.behavior);
        engine.set_sort_groups(self.sort).set_sort_flags(self.sort);
        self.schema.register(&mut engine)?;
        Ok(engine)
    }
}

/// Writes the template schema to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_schema(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, default_schema_template()).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
