//! Group templates: the flag schema shared by every identifier of a group.

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::time::Duration;

use url::Url;

use crate::error::{RegistrationError, ValueError};
use crate::flag::Flag;
use crate::parse::PATH_SEPARATOR;
use crate::value::{
    Bound, FlagType, Native, OptionalValue, ScalarValue, SliceValue, TypedValue, Value,
};

/// The schema for one group name, e.g. `http`.
///
/// Every identifier that appears under this group on the command line
/// (`--http.<identifier>.<flag>`) is validated and converted against the
/// same template. Flags keep their registration order.
///
/// The typed registration methods return a [`Bound`] handle to the flag's
/// value. They panic on registration mistakes (duplicate flag, invalid
/// name, unparsable URL/IP default) since those are bugs in the host
/// program; use [`GroupTemplate::define`] for a fallible variant.
#[derive(Debug)]
pub struct GroupTemplate {
    name: String,
    usage: Option<String>,
    flags: Vec<Flag>,
    index: BTreeMap<String, usize>,
}

impl GroupTemplate {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: None,
            flags: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// The group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The usage heading override, if set.
    #[must_use]
    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// Sets the heading shown for this group in usage output.
    pub fn set_usage(&mut self, usage: impl Into<String>) -> &mut Self {
        self.usage = Some(usage.into());
        self
    }

    /// The heading shown in usage output: the override or the upper-cased
    /// group name.
    #[must_use]
    pub fn heading(&self) -> String {
        self.usage
            .clone()
            .unwrap_or_else(|| self.name.to_uppercase())
    }

    /// Looks up a flag by name.
    #[must_use]
    pub fn lookup(&self, flag: &str) -> Option<&Flag> {
        self.index.get(flag).map(|&position| &self.flags[position])
    }

    /// Looks up a flag by name for modification (e.g. to set a metavar).
    pub fn lookup_mut(&mut self, flag: &str) -> Option<&mut Flag> {
        self.index
            .get(flag)
            .copied()
            .map(|position| &mut self.flags[position])
    }

    /// Iterates over the flags in registration order.
    pub fn flags(&self) -> std::slice::Iter<'_, Flag> {
        self.flags.iter()
    }

    /// Number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if no flags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Registers a string flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered.
    #[track_caller]
    pub fn string(&mut self, name: &str, default: &str, usage: &str) -> Bound<String> {
        self.scalar(name, default.to_string(), usage)
    }

    /// Registers a boolean flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered.
    #[track_caller]
    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> Bound<bool> {
        self.scalar(name, default, usage)
    }

    /// Registers an integer flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered.
    #[track_caller]
    pub fn int(&mut self, name: &str, default: i64, usage: &str) -> Bound<i64> {
        self.scalar(name, default, usage)
    }

    /// Registers a float flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered.
    #[track_caller]
    pub fn float(&mut self, name: &str, default: f64, usage: &str) -> Bound<f64> {
        self.scalar(name, default, usage)
    }

    /// Registers a duration flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered.
    #[track_caller]
    pub fn duration(&mut self, name: &str, default: Duration, usage: &str) -> Bound<Duration> {
        self.scalar(name, default, usage)
    }

    /// Registers a URL flag. An empty `default` means no default.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered, or if
    /// `default` is not empty and not a valid URL.
    #[track_caller]
    pub fn url(&mut self, name: &str, default: &str, usage: &str) -> Bound<Option<Url>> {
        self.optional(name, default, usage)
    }

    /// Registers an IP address flag. An empty `default` means no default.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered, or if
    /// `default` is not empty and not a valid IPv4 or IPv6 address.
    #[track_caller]
    pub fn ip(&mut self, name: &str, default: &str, usage: &str) -> Bound<Option<IpAddr>> {
        self.optional(name, default, usage)
    }

    /// Registers a repeated string flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered.
    #[track_caller]
    pub fn string_slice(&mut self, name: &str, default: &[&str], usage: &str) -> Bound<Vec<String>> {
        let default = default.iter().map(ToString::to_string).collect();
        self.slice(name, default, usage)
    }

    /// Registers a repeated boolean flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered.
    #[track_caller]
    pub fn bool_slice(&mut self, name: &str, default: &[bool], usage: &str) -> Bound<Vec<bool>> {
        self.slice(name, default.to_vec(), usage)
    }

    /// Registers a repeated integer flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered.
    #[track_caller]
    pub fn int_slice(&mut self, name: &str, default: &[i64], usage: &str) -> Bound<Vec<i64>> {
        self.slice(name, default.to_vec(), usage)
    }

    /// Registers a repeated float flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered.
    #[track_caller]
    pub fn float_slice(&mut self, name: &str, default: &[f64], usage: &str) -> Bound<Vec<f64>> {
        self.slice(name, default.to_vec(), usage)
    }

    /// Registers a repeated duration flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered.
    #[track_caller]
    pub fn duration_slice(
        &mut self,
        name: &str,
        default: &[Duration],
        usage: &str,
    ) -> Bound<Vec<Duration>> {
        self.slice(name, default.to_vec(), usage)
    }

    /// Registers a repeated URL flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered, or if any
    /// default is not a valid URL.
    #[track_caller]
    pub fn url_slice(&mut self, name: &str, default: &[&str], usage: &str) -> Bound<Vec<Url>> {
        let default = self.parse_defaults(name, default);
        self.slice(name, default, usage)
    }

    /// Registers a repeated IP address flag.
    ///
    /// # Panics
    ///
    /// Panics if the flag name is invalid or already registered, or if any
    /// default is not a valid IP address.
    #[track_caller]
    pub fn ip_slice(&mut self, name: &str, default: &[&str], usage: &str) -> Bound<Vec<IpAddr>> {
        let default = self.parse_defaults(name, default);
        self.slice(name, default, usage)
    }

    /// Registers a flag of a type chosen at runtime.
    ///
    /// Without a default, URL and IP flags stay unset; every other type
    /// falls back to its zero value (empty string, `false`, `0`, `0s`,
    /// empty slice).
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or taken, or if `default`
    /// is not of type `kind`.
    pub fn define(
        &mut self,
        name: &str,
        kind: FlagType,
        default: Option<Value>,
        usage: &str,
    ) -> Result<&mut Flag, RegistrationError> {
        if let Some(value) = &default {
            if value.kind() != kind {
                return Err(RegistrationError::InvalidDefault {
                    group: self.name.clone(),
                    flag: name.to_string(),
                    source: ValueError::TypeMismatch {
                        expected: kind,
                        actual: value.kind(),
                    },
                });
            }
        }

        let (adapter, default) = adapter_for(kind, default);
        self.insert(Flag::new(name, usage, default, adapter))
    }

    /// Registers a flag of a type chosen at runtime from textual defaults.
    ///
    /// Scalars take at most one default; an empty text counts as no
    /// default for URL and IP flags. Slices parse every entry in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or taken, or if a default
    /// does not convert to `kind`.
    pub fn define_text<S: AsRef<str>>(
        &mut self,
        name: &str,
        kind: FlagType,
        defaults: &[S],
        usage: &str,
    ) -> Result<&mut Flag, RegistrationError> {
        let default = default_from_text(kind, defaults).map_err(|source| {
            RegistrationError::InvalidDefault {
                group: self.name.clone(),
                flag: name.to_string(),
                source,
            }
        })?;
        self.define(name, kind, default, usage)
    }

    pub(crate) fn position(&self, flag: &str) -> Option<usize> {
        self.index.get(flag).copied()
    }

    pub(crate) fn flag_mut(&mut self, position: usize) -> &mut Flag {
        &mut self.flags[position]
    }

    #[track_caller]
    fn scalar<T: Native>(&mut self, name: &str, default: T, usage: &str) -> Bound<T> {
        let slot = Bound::new(default.clone());
        let adapter = Box::new(ScalarValue::new(slot.clone()));
        self.register(Flag::new(name, usage, Some(default.into_value()), adapter));
        slot
    }

    #[track_caller]
    fn optional<T: Native>(&mut self, name: &str, default: &str, usage: &str) -> Bound<Option<T>> {
        let default = if default.is_empty() {
            None
        } else {
            Some(self.parse_default::<T>(name, default))
        };

        let slot = Bound::new(default.clone());
        let adapter = Box::new(OptionalValue::new(slot.clone()));
        self.register(Flag::new(name, usage, default.map(T::into_value), adapter));
        slot
    }

    #[track_caller]
    fn slice<T: Native>(&mut self, name: &str, default: Vec<T>, usage: &str) -> Bound<Vec<T>> {
        let slot = Bound::new(default.clone());
        let adapter = Box::new(SliceValue::new(slot.clone()));
        self.register(Flag::new(
            name,
            usage,
            Some(T::into_slice_value(default)),
            adapter,
        ));
        slot
    }

    #[track_caller]
    fn parse_default<T: Native>(&self, name: &str, text: &str) -> T {
        match T::parse_text(text) {
            Ok(value) => value,
            Err(source) => panic!(
                "{}",
                RegistrationError::InvalidDefault {
                    group: self.name.clone(),
                    flag: name.to_string(),
                    source,
                }
            ),
        }
    }

    #[track_caller]
    fn parse_defaults<T: Native>(&self, name: &str, texts: &[&str]) -> Vec<T> {
        texts
            .iter()
            .map(|text| self.parse_default(name, text))
            .collect()
    }

    #[track_caller]
    fn register(&mut self, flag: Flag) {
        if let Err(err) = self.insert(flag) {
            panic!("{err}");
        }
    }

    fn insert(&mut self, flag: Flag) -> Result<&mut Flag, RegistrationError> {
        validate_name(flag.name())?;
        if self.index.contains_key(flag.name()) {
            return Err(RegistrationError::DuplicateFlag {
                group: self.name.clone(),
                flag: flag.name().to_string(),
            });
        }

        let position = self.flags.len();
        self.index.insert(flag.name().to_string(), position);
        self.flags.push(flag);
        Ok(&mut self.flags[position])
    }
}

/// Checks that a group or flag name can appear as a path segment.
pub(crate) fn validate_name(name: &str) -> Result<(), RegistrationError> {
    if name.is_empty() || name.contains(PATH_SEPARATOR) {
        return Err(RegistrationError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn default_from_text<S: AsRef<str>>(
    kind: FlagType,
    defaults: &[S],
) -> Result<Option<Value>, ValueError> {
    if kind.is_slice() {
        let mut value: Option<Value> = None;
        for text in defaults {
            let item = Value::parse(kind, text.as_ref())?;
            match value.as_mut() {
                Some(existing) => existing.merge(item)?,
                None => value = Some(item),
            }
        }
        return Ok(value);
    }

    match defaults {
        [] => Ok(None),
        [text] if text.as_ref().is_empty() && kind != FlagType::String => Ok(None),
        [text] => Value::parse(kind, text.as_ref()).map(Some),
        [_, extra, ..] => Err(ValueError::Invalid {
            kind,
            input: extra.as_ref().to_string(),
            reason: format!("expected a single default, got {}", defaults.len()),
        }),
    }
}

fn adapter_for(kind: FlagType, default: Option<Value>) -> (Box<dyn TypedValue>, Option<Value>) {
    match kind {
        FlagType::String => scalar_adapter::<String>(default),
        FlagType::Bool => scalar_adapter::<bool>(default),
        FlagType::Int => scalar_adapter::<i64>(default),
        FlagType::Float => scalar_adapter::<f64>(default),
        FlagType::Duration => scalar_adapter::<Duration>(default),
        FlagType::Url => optional_adapter::<Url>(default),
        FlagType::Ip => optional_adapter::<IpAddr>(default),
        FlagType::StringSlice => slice_adapter::<String>(default),
        FlagType::BoolSlice => slice_adapter::<bool>(default),
        FlagType::IntSlice => slice_adapter::<i64>(default),
        FlagType::FloatSlice => slice_adapter::<f64>(default),
        FlagType::DurationSlice => slice_adapter::<Duration>(default),
        FlagType::UrlSlice => slice_adapter::<Url>(default),
        FlagType::IpSlice => slice_adapter::<IpAddr>(default),
    }
}

fn scalar_adapter<T: Native + Default>(
    default: Option<Value>,
) -> (Box<dyn TypedValue>, Option<Value>) {
    let initial = default
        .and_then(|value| T::from_value(value).ok())
        .unwrap_or_default();
    let value = initial.clone().into_value();
    (Box::new(ScalarValue::new(Bound::new(initial))), Some(value))
}

fn optional_adapter<T: Native>(default: Option<Value>) -> (Box<dyn TypedValue>, Option<Value>) {
    let initial = default.and_then(|value| T::from_value(value).ok());
    let value = initial.clone().map(T::into_value);
    (Box::new(OptionalValue::new(Bound::new(initial))), value)
}

fn slice_adapter<T: Native>(default: Option<Value>) -> (Box<dyn TypedValue>, Option<Value>) {
    let initial = default
        .and_then(|value| T::from_slice_value(value).ok())
        .unwrap_or_default();
    let value = T::into_slice_value(initial.clone());
    (Box::new(SliceValue::new(Bound::new(initial))), Some(value))
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
