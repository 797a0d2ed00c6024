//! Native flag values and the per-type conversion rules.

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use serde::ser::{Serialize, SerializeSeq, Serializer};
use url::Url;

use super::duration::{format_duration, parse_duration};
use super::kind::FlagType;
use crate::error::ValueError;

/// A parsed flag value in its native representation.
///
/// Slice variants hold every occurrence in command-line order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string value.
    String(String),
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A float value.
    Float(f64),
    /// A duration value.
    Duration(Duration),
    /// A URL value.
    Url(Url),
    /// An IP address value.
    Ip(IpAddr),
    /// Accumulated string values.
    StringSlice(Vec<String>),
    /// Accumulated boolean values.
    BoolSlice(Vec<bool>),
    /// Accumulated integer values.
    IntSlice(Vec<i64>),
    /// Accumulated float values.
    FloatSlice(Vec<f64>),
    /// Accumulated duration values.
    DurationSlice(Vec<Duration>),
    /// Accumulated URL values.
    UrlSlice(Vec<Url>),
    /// Accumulated IP address values.
    IpSlice(Vec<IpAddr>),
}

impl Value {
    /// Returns the type tag of this value.
    #[must_use]
    pub const fn kind(&self) -> FlagType {
        match self {
            Self::String(_) => FlagType::String,
            Self::Bool(_) => FlagType::Bool,
            Self::Int(_) => FlagType::Int,
            Self::Float(_) => FlagType::Float,
            Self::Duration(_) => FlagType::Duration,
            Self::Url(_) => FlagType::Url,
            Self::Ip(_) => FlagType::Ip,
            Self::StringSlice(_) => FlagType::StringSlice,
            Self::BoolSlice(_) => FlagType::BoolSlice,
            Self::IntSlice(_) => FlagType::IntSlice,
            Self::FloatSlice(_) => FlagType::FloatSlice,
            Self::DurationSlice(_) => FlagType::DurationSlice,
            Self::UrlSlice(_) => FlagType::UrlSlice,
            Self::IpSlice(_) => FlagType::IpSlice,
        }
    }

    /// Parses one command-line token as a value of `kind`.
    ///
    /// For slice kinds the result is a one-element slice.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Invalid`] when the token does not convert.
    pub fn parse(kind: FlagType, text: &str) -> Result<Self, ValueError> {
        match kind {
            FlagType::String => parse_scalar::<String>(text),
            FlagType::Bool => parse_scalar::<bool>(text),
            FlagType::Int => parse_scalar::<i64>(text),
            FlagType::Float => parse_scalar::<f64>(text),
            FlagType::Duration => parse_scalar::<Duration>(text),
            FlagType::Url => parse_scalar::<Url>(text),
            FlagType::Ip => parse_scalar::<IpAddr>(text),
            FlagType::StringSlice => parse_element::<String>(text),
            FlagType::BoolSlice => parse_element::<bool>(text),
            FlagType::IntSlice => parse_element::<i64>(text),
            FlagType::FloatSlice => parse_element::<f64>(text),
            FlagType::DurationSlice => parse_element::<Duration>(text),
            FlagType::UrlSlice => parse_element::<Url>(text),
            FlagType::IpSlice => parse_element::<IpAddr>(text),
        }
    }

    /// Merges `other` into this value: slices append, scalars are replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] when the kinds differ.
    pub fn merge(&mut self, other: Self) -> Result<(), ValueError> {
        let expected = self.kind();
        let actual = other.kind();
        if expected != actual {
            return Err(ValueError::TypeMismatch { expected, actual });
        }

        match (self, other) {
            (Self::StringSlice(items), Self::StringSlice(more)) => items.extend(more),
            (Self::BoolSlice(items), Self::BoolSlice(more)) => items.extend(more),
            (Self::IntSlice(items), Self::IntSlice(more)) => items.extend(more),
            (Self::FloatSlice(items), Self::FloatSlice(more)) => items.extend(more),
            (Self::DurationSlice(items), Self::DurationSlice(more)) => items.extend(more),
            (Self::UrlSlice(items), Self::UrlSlice(more)) => items.extend(more),
            (Self::IpSlice(items), Self::IpSlice(more)) => items.extend(more),
            (this, other) => *this = other,
        }
        Ok(())
    }
}

fn parse_scalar<T: Native>(text: &str) -> Result<Value, ValueError> {
    T::parse_text(text).map(T::into_value)
}

fn parse_element<T: Native>(text: &str) -> Result<Value, ValueError> {
    T::parse_text(text).map(|item| T::into_slice_value(vec![item]))
}

fn join<T>(f: &mut fmt::Formatter<'_>, items: &[T], render: impl Fn(&T) -> String) -> fmt::Result {
    let rendered: Vec<String> = items.iter().map(render).collect();
    write!(f, "{}", rendered.join(","))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Duration(v) => write!(f, "{}", format_duration(*v)),
            Self::Url(v) => write!(f, "{v}"),
            Self::Ip(v) => write!(f, "{v}"),
            Self::StringSlice(v) => join(f, v, Clone::clone),
            Self::BoolSlice(v) => join(f, v, ToString::to_string),
            Self::IntSlice(v) => join(f, v, ToString::to_string),
            Self::FloatSlice(v) => join(f, v, ToString::to_string),
            Self::DurationSlice(v) => join(f, v, |d| format_duration(*d)),
            Self::UrlSlice(v) => join(f, v, ToString::to_string),
            Self::IpSlice(v) => join(f, v, ToString::to_string),
        }
    }
}

fn serialize_seq<S, T, U>(serializer: S, items: &[T], convert: impl Fn(&T) -> U) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    U: Serialize,
{
    let mut seq = serializer.serialize_seq(Some(items.len()))?;
    for item in items {
        seq.serialize_element(&convert(item))?;
    }
    seq.end()
}

/// Durations, URLs and IP addresses serialize as their textual form.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(v) => serializer.serialize_str(v),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Duration(v) => serializer.serialize_str(&format_duration(*v)),
            Self::Url(v) => serializer.serialize_str(v.as_str()),
            Self::Ip(v) => serializer.collect_str(v),
            Self::StringSlice(v) => v.serialize(serializer),
            Self::BoolSlice(v) => v.serialize(serializer),
            Self::IntSlice(v) => v.serialize(serializer),
            Self::FloatSlice(v) => v.serialize(serializer),
            Self::DurationSlice(v) => serialize_seq(serializer, v, |d| format_duration(*d)),
            Self::UrlSlice(v) => serialize_seq(serializer, v, ToString::to_string),
            Self::IpSlice(v) => serialize_seq(serializer, v, ToString::to_string),
        }
    }
}

/// A Rust type that can back a flag.
///
/// Implemented for `String`, `bool`, `i64`, `f64`, [`Duration`], [`Url`]
/// and [`IpAddr`]; each implementation knows its scalar and slice
/// [`FlagType`] and how to move in and out of [`Value`].
pub trait Native: Clone + fmt::Debug + 'static {
    /// Tag of the scalar flag type.
    const KIND: FlagType;
    /// Tag of the slice flag type.
    const SLICE_KIND: FlagType;

    /// Converts a command-line token.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Invalid`] wrapping the conversion failure.
    fn parse_text(text: &str) -> Result<Self, ValueError>;

    /// Wraps a scalar into a [`Value`].
    fn into_value(self) -> Value;

    /// Wraps a sequence into a slice [`Value`].
    fn into_slice_value(items: Vec<Self>) -> Value;

    /// Unwraps a scalar [`Value`], handing the value back on mismatch.
    ///
    /// # Errors
    ///
    /// Returns the original value when its variant does not match.
    fn from_value(value: Value) -> Result<Self, Value>;

    /// Unwraps a slice [`Value`], handing the value back on mismatch.
    ///
    /// # Errors
    ///
    /// Returns the original value when its variant does not match.
    fn from_slice_value(value: Value) -> Result<Vec<Self>, Value>;

    /// Borrows the scalar held by a [`Value`].
    fn from_ref(value: &Value) -> Option<&Self>;

    /// Borrows the elements held by a slice [`Value`].
    fn slice_from_ref(value: &Value) -> Option<&[Self]>;
}

fn invalid(kind: FlagType, input: &str, reason: impl fmt::Display) -> ValueError {
    ValueError::Invalid {
        kind,
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

macro_rules! native {
    ($ty:ty, $scalar:ident, $slice:ident, $parse:expr) => {
        impl Native for $ty {
            const KIND: FlagType = FlagType::$scalar;
            const SLICE_KIND: FlagType = FlagType::$slice;

            fn parse_text(text: &str) -> Result<Self, ValueError> {
                let parse: fn(&str) -> Result<Self, String> = $parse;
                parse(text).map_err(|reason| invalid(Self::KIND, text, reason))
            }

            fn into_value(self) -> Value {
                Value::$scalar(self)
            }

            fn into_slice_value(items: Vec<Self>) -> Value {
                Value::$slice(items)
            }

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$scalar(v) => Ok(v),
                    other => Err(other),
                }
            }

            fn from_slice_value(value: Value) -> Result<Vec<Self>, Value> {
                match value {
                    Value::$slice(v) => Ok(v),
                    other => Err(other),
                }
            }

            fn from_ref(value: &Value) -> Option<&Self> {
                match value {
                    Value::$scalar(v) => Some(v),
                    _ => None,
                }
            }

            fn slice_from_ref(value: &Value) -> Option<&[Self]> {
                match value {
                    Value::$slice(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

native!(String, String, StringSlice, |text| Ok(text.to_string()));
native!(bool, Bool, BoolSlice, |text| text.parse().map_err(|e| format!("{e}")));
native!(i64, Int, IntSlice, |text| text.parse().map_err(|e| format!("{e}")));
native!(f64, Float, FloatSlice, |text| text.parse().map_err(|e| format!("{e}")));
native!(Duration, Duration, DurationSlice, parse_duration);
native!(Url, Url, UrlSlice, |text| Url::parse(text).map_err(|e| format!("{e}")));
native!(IpAddr, Ip, IpSlice, |text| text.parse().map_err(|e| format!("{e}")));

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    mod parsing {
        use super::*;

        #[test]
        fn scalars_match_native_conversion() {
            assert_eq!(
                Value::parse(FlagType::String, "GET").unwrap(),
                Value::String("GET".to_string())
            );
            assert_eq!(Value::parse(FlagType::Bool, "true").unwrap(), Value::Bool(true));
            assert_eq!(Value::parse(FlagType::Int, "-42").unwrap(), Value::Int(-42));
            assert_eq!(
                Value::parse(FlagType::Float, "2.5").unwrap(),
                Value::Float("2.5".parse::<f64>().unwrap())
            );
            assert_eq!(
                Value::parse(FlagType::Duration, "3s").unwrap(),
                Value::Duration(Duration::from_secs(3))
            );
            assert_eq!(
                Value::parse(FlagType::Url, "https://example.com/health").unwrap(),
                Value::Url(Url::parse("https://example.com/health").unwrap())
            );
            assert_eq!(
                Value::parse(FlagType::Ip, "10.0.0.1").unwrap(),
                Value::Ip(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
            );
            assert_eq!(
                Value::parse(FlagType::Ip, "::1").unwrap(),
                Value::Ip(IpAddr::V6(Ipv6Addr::LOCALHOST))
            );
        }

        #[test]
        fn slices_yield_one_element() {
            assert_eq!(
                Value::parse(FlagType::IntSlice, "7").unwrap(),
                Value::IntSlice(vec![7])
            );
            assert_eq!(
                Value::parse(FlagType::StringSlice, "a,b").unwrap(),
                Value::StringSlice(vec!["a,b".to_string()])
            );
        }

        #[test]
        fn duration_accepts_compound_and_fractional_literals() {
            assert_eq!(
                Value::parse(FlagType::Duration, "1h30m").unwrap(),
                Value::Duration(Duration::from_secs(5400))
            );
            assert_eq!(
                Value::parse(FlagType::Duration, "1.5s").unwrap(),
                Value::Duration(Duration::from_millis(1500))
            );

            let err = Value::parse(FlagType::Duration, "-5s").unwrap_err();
            assert!(err.to_string().contains("invalid duration value '-5s'"));
        }

        #[test]
        fn bool_rejects_aliases() {
            for token in ["yes", "no", "1", "0", "TRUE", "t"] {
                let err = Value::parse(FlagType::Bool, token).unwrap_err();
                assert!(err.to_string().contains("invalid boolean value"), "{err}");
            }
        }

        #[test]
        fn errors_name_the_type() {
            let err = Value::parse(FlagType::Int, "abc").unwrap_err();
            assert!(err.to_string().contains("invalid integer value 'abc'"));

            let err = Value::parse(FlagType::Duration, "5x").unwrap_err();
            assert!(err.to_string().contains("invalid duration value '5x'"));

            let err = Value::parse(FlagType::Ip, "300.1.1.1").unwrap_err();
            assert!(err.to_string().contains("invalid IP address value"));

            let err = Value::parse(FlagType::Url, "not a url").unwrap_err();
            assert!(err.to_string().contains("invalid URL value"));
        }
    }

    mod merging {
        use super::*;

        #[test]
        fn slices_append_in_order() {
            let mut value = Value::StringSlice(vec!["a".to_string()]);
            value.merge(Value::StringSlice(vec!["b".to_string()])).unwrap();
            assert_eq!(
                value,
                Value::StringSlice(vec!["a".to_string(), "b".to_string()])
            );
        }

        #[test]
        fn scalars_are_replaced() {
            let mut value = Value::Int(1);
            value.merge(Value::Int(2)).unwrap();
            assert_eq!(value, Value::Int(2));
        }

        #[test]
        fn mismatched_kinds_fail() {
            let mut value = Value::Int(1);
            let err = value.merge(Value::Bool(true)).unwrap_err();
            assert!(matches!(
                err,
                ValueError::TypeMismatch {
                    expected: FlagType::Int,
                    actual: FlagType::Bool
                }
            ));
            assert_eq!(value, Value::Int(1));
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn display_uses_literal_forms() {
            assert_eq!(Value::Duration(Duration::from_secs(1)).to_string(), "1s");
            assert_eq!(Value::Bool(false).to_string(), "false");
            assert_eq!(
                Value::IntSlice(vec![1, 2, 3]).to_string(),
                "1,2,3"
            );
            assert_eq!(Value::StringSlice(Vec::new()).to_string(), "");
        }

        #[test]
        fn serializes_textual_types_as_strings() {
            let json = serde_json::to_string(&Value::DurationSlice(vec![
                Duration::from_millis(500),
                Duration::from_secs(2),
            ]))
            .unwrap();
            assert_eq!(json, r#"["500ms","2s"]"#);

            let json = serde_json::to_string(&Value::Ip("127.0.0.1".parse().unwrap())).unwrap();
            assert_eq!(json, r#""127.0.0.1""#);
        }
    }
}
