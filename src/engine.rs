//! The flag engine: group registry, parse driver and result stores.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ParseError, RegistrationError};
use crate::group::{GroupTemplate, validate_name};
use crate::parse::{FlagToken, Tokenizer};
use crate::parsed::{ParsedGroup, ParsedGroups};
use crate::unknown::{UnknownGroup, UnknownGroups};
use crate::usage::{UsageOptions, render_usage};

/// How [`Engine::parse`] treats flags whose group or flag name is not
/// registered.
///
/// Malformed arguments and unconvertible values of known flags are always
/// errors, whatever the behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseBehavior {
    /// Skip unknown flags. Their arguments are kept in
    /// [`Engine::unparsed_args`].
    #[serde(rename = "continue")]
    ContinueOnError,
    /// Abort the parse with [`ParseError::UnknownGroup`] or
    /// [`ParseError::UnknownFlag`].
    #[default]
    #[serde(rename = "exit")]
    ExitOnError,
    /// Record unknown flags as raw strings in [`Engine::unknown`].
    #[serde(rename = "unknown")]
    ParseUnknown,
}

impl fmt::Display for ParseBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContinueOnError => write!(f, "continue"),
            Self::ExitOnError => write!(f, "exit"),
            Self::ParseUnknown => write!(f, "unknown"),
        }
    }
}

/// A dynamic hierarchical flag set.
///
/// The host registers [`GroupTemplate`]s and their flags, calls
/// [`parse`](Self::parse) with the command-line arguments, then reads one
/// [`ParsedGroup`] per `(group, identifier)` pair that appeared.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use dynflags::{Engine, ParseBehavior};
///
/// let mut engine = Engine::new(ParseBehavior::ExitOnError);
/// let tcp = engine.group("tcp");
/// tcp.duration("timeout", Duration::from_secs(1), "Dial timeout");
/// tcp.string("address", "", "Address to dial");
///
/// engine
///     .parse(["--tcp.db.address=localhost:5432", "--tcp.db.timeout=3s"])
///     .unwrap();
///
/// let db = engine.parsed().instance("tcp", "db").unwrap();
/// assert_eq!(db.get_string("address").unwrap(), "localhost:5432");
/// assert_eq!(db.get_duration("timeout").unwrap(), Duration::from_secs(3));
/// ```
pub struct Engine {
    behavior: ParseBehavior,
    groups: Vec<GroupTemplate>,
    index: BTreeMap<String, usize>,
    parsed: ParsedGroups,
    unknown: UnknownGroups,
    unparsed_args: Vec<String>,
    usage: UsageOptions,
    output: Box<dyn Write>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("behavior", &self.behavior)
            .field("groups", &self.groups)
            .field("parsed", &self.parsed)
            .field("unknown", &self.unknown)
            .field("unparsed_args", &self.unparsed_args)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(ParseBehavior::default())
    }
}

impl Engine {
    /// Creates an empty engine. Usage output goes to stderr.
    #[must_use]
    pub fn new(behavior: ParseBehavior) -> Self {
        Self {
            behavior,
            groups: Vec::new(),
            index: BTreeMap::new(),
            parsed: ParsedGroups::default(),
            unknown: UnknownGroups::default(),
            unparsed_args: Vec::new(),
            usage: UsageOptions::default(),
            output: Box::new(io::stderr()),
        }
    }

    /// The configured unknown-flag behavior.
    #[must_use]
    pub const fn behavior(&self) -> ParseBehavior {
        self.behavior
    }

    /// Registers a new group template and returns it for adding flags.
    ///
    /// # Panics
    ///
    /// Panics if a group with this name is already registered or the name
    /// is empty or contains `.`; templates are declared once at startup.
    #[track_caller]
    pub fn group(&mut self, name: &str) -> &mut GroupTemplate {
        match self.try_group(name) {
            Ok(group) => group,
            Err(err) => panic!("{err}"),
        }
    }

    /// Registers a new group template.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken, empty or contains `.`.
    pub fn try_group(&mut self, name: &str) -> Result<&mut GroupTemplate, RegistrationError> {
        validate_name(name)?;
        if self.index.contains_key(name) {
            return Err(RegistrationError::DuplicateGroup(name.to_string()));
        }

        let position = self.groups.len();
        self.index.insert(name.to_string(), position);
        self.groups.push(GroupTemplate::new(name));
        Ok(&mut self.groups[position])
    }

    /// Looks up a registered group template.
    #[must_use]
    pub fn lookup_group(&self, name: &str) -> Option<&GroupTemplate> {
        self.index.get(name).map(|&position| &self.groups[position])
    }

    /// Looks up a registered group template for modification.
    pub fn lookup_group_mut(&mut self, name: &str) -> Option<&mut GroupTemplate> {
        self.index
            .get(name)
            .copied()
            .map(|position| &mut self.groups[position])
    }

    /// The registered group templates, in registration order.
    #[must_use]
    pub fn groups(&self) -> &[GroupTemplate] {
        &self.groups
    }

    /// Parses command-line arguments (without the program name).
    ///
    /// Results accumulate into [`parsed`](Self::parsed),
    /// [`unknown`](Self::unknown) and [`unparsed_args`](Self::unparsed_args);
    /// calling `parse` again adds to them.
    ///
    /// # Errors
    ///
    /// Returns the first structural error, value conversion error or (under
    /// [`ParseBehavior::ExitOnError`]) unknown flag. Values stored before
    /// the error are kept.
    pub fn parse<I, S>(&mut self, args: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in Tokenizer::new(args.into_iter().map(Into::into)) {
            self.apply(token?)?;
        }

        debug!(
            groups = self.parsed.len(),
            instances = self.parsed.instances().count(),
            unknown = self.unknown.instances().count(),
            skipped = self.unparsed_args.len(),
            "Parsed command-line flags"
        );
        Ok(())
    }

    fn apply(&mut self, token: FlagToken) -> Result<(), ParseError> {
        let resolved = self.index.get(&token.path.group).and_then(|&group| {
            self.groups[group]
                .position(&token.path.flag)
                .map(|flag| (group, flag))
        });

        let Some((group, flag)) = resolved else {
            return self.apply_unknown(token);
        };

        let FlagToken { path, value, .. } = token;
        let invalid = |source| ParseError::InvalidValue {
            path: path.to_string(),
            source,
        };

        let template = &mut self.groups[group];
        let definition = template.flag_mut(flag);
        let parsed = definition.parse(&value).map_err(invalid)?;
        definition.set(parsed.clone()).map_err(invalid)?;
        trace!(flag = %path, value = %parsed, "Assigned flag");

        let template = &self.groups[group];
        self.parsed
            .get_or_insert_with(&path.group, &path.identifier, || {
                ParsedGroup::seeded(template, &path.identifier)
            })
            .assign(&path.flag, parsed)
            .map_err(invalid)
    }

    fn apply_unknown(&mut self, token: FlagToken) -> Result<(), ParseError> {
        let FlagToken { args, path, value } = token;
        match self.behavior {
            ParseBehavior::ContinueOnError => {
                debug!(flag = %path, "Skipping unknown flag");
                self.unparsed_args.extend(args);
                Ok(())
            }
            ParseBehavior::ExitOnError if self.index.contains_key(&path.group) => {
                Err(ParseError::UnknownFlag {
                    group: path.group,
                    identifier: path.identifier,
                    flag: path.flag,
                })
            }
            ParseBehavior::ExitOnError => Err(ParseError::UnknownGroup {
                group: path.group,
                identifier: path.identifier,
            }),
            ParseBehavior::ParseUnknown => {
                debug!(flag = %path, "Recording unknown flag");
                self.unknown
                    .get_or_insert_with(&path.group, &path.identifier, || {
                        UnknownGroup::new(&path.group, &path.identifier)
                    })
                    .push(&path.flag, value);
                Ok(())
            }
        }
    }

    /// Instances for every recognised `(group, identifier)` pair.
    #[must_use]
    pub const fn parsed(&self) -> &ParsedGroups {
        &self.parsed
    }

    /// Instances for unrecognised flags. Only populated under
    /// [`ParseBehavior::ParseUnknown`].
    #[must_use]
    pub const fn unknown(&self) -> &UnknownGroups {
        &self.unknown
    }

    /// Arguments skipped under [`ParseBehavior::ContinueOnError`].
    #[must_use]
    pub fn unparsed_args(&self) -> &[String] {
        &self.unparsed_args
    }

    /// Sets the title printed at the top of the usage text.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.usage.title = Some(title.into());
        self
    }

    /// Sets the description printed after the title.
    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.usage.description = Some(description.into());
        self
    }

    /// Sets the epilog printed after all groups.
    pub fn epilog(&mut self, epilog: impl Into<String>) -> &mut Self {
        self.usage.epilog = Some(epilog.into());
        self
    }

    /// Orders groups by name in the usage text.
    pub const fn set_sort_groups(&mut self, sort: bool) -> &mut Self {
        self.usage.sort_groups = sort;
        self
    }

    /// Orders flags by name in the usage text.
    pub const fn set_sort_flags(&mut self, sort: bool) -> &mut Self {
        self.usage.sort_flags = sort;
        self
    }

    /// Redirects [`usage`](Self::usage) output.
    pub fn set_output(&mut self, output: impl Write + 'static) -> &mut Self {
        self.output = Box::new(output);
        self
    }

    /// Renders the usage text.
    #[must_use]
    pub fn usage_string(&self) -> String {
        render_usage(&self.usage, &self.groups)
    }

    /// Writes the usage text to the configured output.
    ///
    /// # Errors
    ///
    /// Returns any error from the output writer.
    pub fn usage(&mut self) -> io::Result<()> {
        let text = self.usage_string();
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
