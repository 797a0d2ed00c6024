//! Raw values captured for unrecognised flags under
//! [`ParseBehavior::ParseUnknown`](crate::ParseBehavior::ParseUnknown).

use std::collections::BTreeMap;

use crate::error::LookupError;
use crate::store::{Groups, Identifiers};

/// Unknown instances, keyed by group name and identifier.
pub type UnknownGroups = Groups<UnknownGroup>;

/// Unknown instances of one group, keyed by identifier.
pub type UnknownIdentifiers = Identifiers<UnknownGroup>;

/// Raw string values for one unrecognised `(group, identifier)` pair.
///
/// Every occurrence of a flag is kept; [`get`](Self::get) returns the most
/// recent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownGroup {
    group: String,
    identifier: String,
    values: BTreeMap<String, Vec<String>>,
}

impl UnknownGroup {
    pub(crate) fn new(group: &str, identifier: &str) -> Self {
        Self {
            group: group.to_string(),
            identifier: identifier.to_string(),
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn push(&mut self, flag: &str, value: String) {
        self.values.entry(flag.to_string()).or_default().push(value);
    }

    /// The group name as written on the command line.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the last value given for `flag`.
    #[must_use]
    pub fn get(&self, flag: &str) -> Option<&str> {
        self.values
            .get(flag)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Returns every value given for `flag`, in command-line order.
    #[must_use]
    pub fn get_all(&self, flag: &str) -> &[String] {
        self.values.get(flag).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the last value given for `flag`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if the flag never appeared.
    pub fn get_string(&self, flag: &str) -> Result<&str, LookupError> {
        self.get(flag).ok_or_else(|| LookupError::NotFound {
            flag: flag.to_string(),
        })
    }

    /// Iterates over `(flag, last value)` pairs, sorted by flag name.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().filter_map(|(name, values)| {
            values.last().map(|value| (name.as_str(), value.as_str()))
        })
    }

    /// Iterates over `(flag, every value)` pairs, sorted by flag name.
    pub fn occurrences(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}
