//! Parsed group instances and their typed getters.

use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;
use std::time::Duration;

use url::Url;

use crate::error::{LookupError, ValueError};
use crate::group::GroupTemplate;
use crate::store::{Groups, Identifiers};
use crate::value::{FlagType, Native, Value};

/// Parsed instances, keyed by group name and identifier.
pub type ParsedGroups = Groups<ParsedGroup>;

/// Parsed instances of one group, keyed by identifier.
pub type ParsedIdentifiers = Identifiers<ParsedGroup>;

/// The configuration of one identifier within a group, e.g. the flags given
/// as `--http.myserver.*`.
///
/// Created the first time a recognised flag for `(group, identifier)` is
/// parsed, seeded with the template's defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedGroup {
    group: String,
    identifier: String,
    values: BTreeMap<String, Value>,
    explicit: BTreeSet<String>,
}

impl ParsedGroup {
    pub(crate) fn seeded(template: &GroupTemplate, identifier: &str) -> Self {
        let values = template
            .flags()
            .filter_map(|flag| {
                flag.default()
                    .map(|value| (flag.name().to_string(), value.clone()))
            })
            .collect();

        Self {
            group: template.name().to_string(),
            identifier: identifier.to_string(),
            values,
            explicit: BTreeSet::new(),
        }
    }

    /// Stores a value given on the command line.
    ///
    /// The first explicit value replaces the default; later scalar values
    /// overwrite, later slice values append.
    pub(crate) fn assign(&mut self, flag: &str, value: Value) -> Result<(), ValueError> {
        if self.explicit.contains(flag) {
            if let Some(existing) = self.values.get_mut(flag) {
                return existing.merge(value);
            }
        }

        self.values.insert(flag.to_string(), value);
        self.explicit.insert(flag.to_string());
        Ok(())
    }

    /// The group name.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the raw value of a flag, explicit or default.
    #[must_use]
    pub fn lookup(&self, flag: &str) -> Option<&Value> {
        self.values.get(flag)
    }

    /// Returns true if the flag was given on the command line.
    #[must_use]
    pub fn is_set(&self, flag: &str) -> bool {
        self.explicit.contains(flag)
    }

    /// Iterates over `(flag, value)` pairs, sorted by flag name.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns a string flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or is not a string.
    pub fn get_string(&self, flag: &str) -> Result<&str, LookupError> {
        self.scalar::<String>(flag).map(String::as_str)
    }

    /// Returns a boolean flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or is not a boolean.
    pub fn get_bool(&self, flag: &str) -> Result<bool, LookupError> {
        self.scalar::<bool>(flag).copied()
    }

    /// Returns an integer flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or is not an integer.
    pub fn get_int(&self, flag: &str) -> Result<i64, LookupError> {
        self.scalar::<i64>(flag).copied()
    }

    /// Returns a float flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or is not a float.
    pub fn get_float64(&self, flag: &str) -> Result<f64, LookupError> {
        self.scalar::<f64>(flag).copied()
    }

    /// Returns a duration flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or is not a duration.
    pub fn get_duration(&self, flag: &str) -> Result<Duration, LookupError> {
        self.scalar::<Duration>(flag).copied()
    }

    /// Returns a URL flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or is not a URL.
    pub fn get_url(&self, flag: &str) -> Result<&Url, LookupError> {
        self.scalar::<Url>(flag)
    }

    /// Returns an IP address flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or is not an IP.
    pub fn get_ip(&self, flag: &str) -> Result<IpAddr, LookupError> {
        self.scalar::<IpAddr>(flag).copied()
    }

    /// Returns a repeated string flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or has another type.
    pub fn get_string_slice(&self, flag: &str) -> Result<&[String], LookupError> {
        self.slice::<String>(flag)
    }

    /// Returns a repeated boolean flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or has another type.
    pub fn get_bool_slice(&self, flag: &str) -> Result<&[bool], LookupError> {
        self.slice::<bool>(flag)
    }

    /// Returns a repeated integer flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or has another type.
    pub fn get_int_slice(&self, flag: &str) -> Result<&[i64], LookupError> {
        self.slice::<i64>(flag)
    }

    /// Returns a repeated float flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or has another type.
    pub fn get_float64_slice(&self, flag: &str) -> Result<&[f64], LookupError> {
        self.slice::<f64>(flag)
    }

    /// Returns a repeated duration flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or has another type.
    pub fn get_duration_slice(&self, flag: &str) -> Result<&[Duration], LookupError> {
        self.slice::<Duration>(flag)
    }

    /// Returns a repeated URL flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or has another type.
    pub fn get_url_slice(&self, flag: &str) -> Result<&[Url], LookupError> {
        self.slice::<Url>(flag)
    }

    /// Returns a repeated IP address flag.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the flag has no value or has another type.
    pub fn get_ip_slice(&self, flag: &str) -> Result<&[IpAddr], LookupError> {
        self.slice::<IpAddr>(flag)
    }

    fn value(&self, flag: &str) -> Result<&Value, LookupError> {
        self.values.get(flag).ok_or_else(|| LookupError::NotFound {
            flag: flag.to_string(),
        })
    }

    fn scalar<T: Native>(&self, flag: &str) -> Result<&T, LookupError> {
        let value = self.value(flag)?;
        T::from_ref(value).ok_or_else(|| wrong_type(flag, T::KIND, value))
    }

    fn slice<T: Native>(&self, flag: &str) -> Result<&[T], LookupError> {
        let value = self.value(flag)?;
        T::slice_from_ref(value).ok_or_else(|| wrong_type(flag, T::SLICE_KIND, value))
    }
}

fn wrong_type(flag: &str, expected: FlagType, value: &Value) -> LookupError {
    LookupError::WrongType {
        flag: flag.to_string(),
        expected,
        actual: value.kind(),
    }
}

#[cfg(test)]
#[path = "parsed_tests.rs"]
mod tests;
