//! Flag type tags used for display and introspection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared type of a flag.
///
/// The tag only describes a flag; parsing and storage are handled by the
/// flag's [`TypedValue`](super::TypedValue) adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagType {
    /// UTF-8 string.
    String,
    /// `true` or `false`.
    Bool,
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// Duration literal such as `5s` or `1h30m`.
    Duration,
    /// Absolute URL.
    Url,
    /// IPv4 or IPv6 address.
    Ip,
    /// Repeated string flag.
    StringSlice,
    /// Repeated boolean flag.
    BoolSlice,
    /// Repeated integer flag.
    IntSlice,
    /// Repeated float flag.
    FloatSlice,
    /// Repeated duration flag.
    DurationSlice,
    /// Repeated URL flag.
    UrlSlice,
    /// Repeated IP address flag.
    IpSlice,
}

impl FlagType {
    /// All flag types, scalars first.
    pub const ALL: [Self; 14] = [
        Self::String,
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::Duration,
        Self::Url,
        Self::Ip,
        Self::StringSlice,
        Self::BoolSlice,
        Self::IntSlice,
        Self::FloatSlice,
        Self::DurationSlice,
        Self::UrlSlice,
        Self::IpSlice,
    ];

    /// Returns true for the repeated (slice) variants.
    #[must_use]
    pub const fn is_slice(self) -> bool {
        matches!(
            self,
            Self::StringSlice
                | Self::BoolSlice
                | Self::IntSlice
                | Self::FloatSlice
                | Self::DurationSlice
                | Self::UrlSlice
                | Self::IpSlice
        )
    }

    /// Returns the scalar type of a single element.
    ///
    /// Scalars map to themselves.
    #[must_use]
    pub const fn element(self) -> Self {
        match self {
            Self::StringSlice => Self::String,
            Self::BoolSlice => Self::Bool,
            Self::IntSlice => Self::Int,
            Self::FloatSlice => Self::Float,
            Self::DurationSlice => Self::Duration,
            Self::UrlSlice => Self::Url,
            Self::IpSlice => Self::Ip,
            scalar => scalar,
        }
    }

    /// Placeholder shown after the flag path in usage output.
    #[must_use]
    pub const fn metavar(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Bool => "BOOL",
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Duration => "DURATION",
            Self::Url => "URL",
            Self::Ip => "IP",
            Self::StringSlice => "STRINGS",
            Self::BoolSlice => "BOOLS",
            Self::IntSlice => "INTS",
            Self::FloatSlice => "FLOATS",
            Self::DurationSlice => "DURATIONS",
            Self::UrlSlice => "URLS",
            Self::IpSlice => "IPS",
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "boolean"),
            Self::Int => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Duration => write!(f, "duration"),
            Self::Url => write!(f, "URL"),
            Self::Ip => write!(f, "IP address"),
            slice => write!(f, "{} slice", slice.element()),
        }
    }
}
