//! Flag definitions.

use crate::error::ValueError;
use crate::value::{FlagType, TypedValue, Value};

/// A flag registered on a [`GroupTemplate`](crate::GroupTemplate).
///
/// Pairs a name, usage text and default with the adapter that converts and
/// stores the flag's values. Immutable once parsing starts, apart from the
/// adapter's bound slot.
#[derive(Debug)]
pub struct Flag {
    name: String,
    usage: String,
    kind: FlagType,
    default: Option<Value>,
    metavar: Option<String>,
    value: Box<dyn TypedValue>,
}

impl Flag {
    pub(crate) fn new(
        name: impl Into<String>,
        usage: impl Into<String>,
        default: Option<Value>,
        value: Box<dyn TypedValue>,
    ) -> Self {
        Self {
            name: name.into(),
            usage: usage.into(),
            kind: value.kind(),
            default,
            metavar: None,
            value,
        }
    }

    /// The flag name (last path segment).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The usage text.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The declared type.
    #[must_use]
    pub const fn kind(&self) -> FlagType {
        self.kind
    }

    /// The default value, if any.
    #[must_use]
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The default rendered for help output; empty when there is nothing
    /// worth showing.
    #[must_use]
    pub fn default_text(&self) -> String {
        self.default.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    /// Placeholder shown after the flag path in usage output.
    ///
    /// Defaults to the type's metavar, e.g. `DURATION`.
    #[must_use]
    pub fn metavar(&self) -> &str {
        self.metavar.as_deref().unwrap_or_else(|| self.kind.metavar())
    }

    /// Overrides the usage placeholder.
    pub fn set_metavar(&mut self, metavar: impl Into<String>) -> &mut Self {
        self.metavar = Some(metavar.into());
        self
    }

    pub(crate) fn parse(&self, text: &str) -> Result<Value, ValueError> {
        self.value.parse(text)
    }

    pub(crate) fn set(&mut self, value: Value) -> Result<(), ValueError> {
        self.value.set(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Bound, ScalarValue, SliceValue};
    use std::time::Duration;

    fn timeout_flag() -> Flag {
        let slot = Bound::new(Duration::from_secs(1));
        Flag::new(
            "timeout",
            "Connection timeout",
            Some(Value::Duration(Duration::from_secs(1))),
            Box::new(ScalarValue::new(slot)),
        )
    }

    #[test]
    fn kind_comes_from_adapter() {
        assert_eq!(timeout_flag().kind(), FlagType::Duration);
    }

    #[test]
    fn default_text_renders_literal() {
        assert_eq!(timeout_flag().default_text(), "1s");
    }

    #[test]
    fn empty_defaults_render_empty() {
        let flag = Flag::new(
            "header",
            "",
            Some(Value::StringSlice(Vec::new())),
            Box::new(SliceValue::<String>::new(Bound::new(Vec::new()))),
        );
        assert_eq!(flag.default_text(), "");
    }

    #[test]
    fn metavar_override() {
        let mut flag = timeout_flag();
        assert_eq!(flag.metavar(), "DURATION");

        flag.set_metavar("TIMEOUT");
        assert_eq!(flag.metavar(), "TIMEOUT");
    }

    #[test]
    fn parse_then_set_updates_adapter() {
        let slot = Bound::new(String::new());
        let mut flag = Flag::new(
            "method",
            "",
            None,
            Box::new(ScalarValue::new(slot.clone())),
        );

        let value = flag.parse("POST").unwrap();
        flag.set(value).unwrap();
        assert_eq!(slot.get(), "POST");
    }
}
