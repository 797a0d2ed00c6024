//! dynflags: dynamic hierarchical command-line flags
//!
//! Flags are written as `--<group>.<identifier>.<flag>=<value>`. The host
//! registers one template per group; every identifier the user invents on
//! the command line gets its own typed configuration instance, validated
//! against that template.
//!
//! ```
//! use dynflags::{Engine, ParseBehavior};
//!
//! let mut engine = Engine::new(ParseBehavior::ExitOnError);
//! let http = engine.group("http");
//! http.string("method", "GET", "HTTP method");
//!
//! engine
//!     .parse(["--http.a.method=POST", "--http.b.method", "PUT"])
//!     .unwrap();
//!
//! let http = engine.parsed().lookup("http").unwrap();
//! assert_eq!(http.lookup("a").unwrap().get_string("method").unwrap(), "POST");
//! assert_eq!(http.lookup("b").unwrap().get_string("method").unwrap(), "PUT");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod flag;
pub mod group;
pub mod parse;
pub mod parsed;
pub mod report;
pub mod store;
pub mod unknown;
pub mod usage;
pub mod value;

pub use engine::{Engine, ParseBehavior};
pub use error::{LookupError, ParseError, RegistrationError, ValueError};
pub use flag::Flag;
pub use group::GroupTemplate;
pub use parse::{FlagPath, FlagToken, Tokenizer};
pub use parsed::{ParsedGroup, ParsedGroups, ParsedIdentifiers};
pub use report::{Format, Report};
pub use store::{Groups, Identifiers};
pub use unknown::{UnknownGroup, UnknownGroups, UnknownIdentifiers};
pub use usage::{UsageOptions, render_usage};
pub use value::{
    Bound, FlagType, Native, OptionalValue, ScalarValue, SliceValue, TypedValue, Value,
    format_duration, parse_duration,
};
