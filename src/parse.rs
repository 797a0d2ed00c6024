//! Tokenizer for `--<group>.<identifier>.<flag>[=<value>]` arguments.
//!
//! The tokenizer only checks structure. Resolving paths against the group
//! templates is done by the [`Engine`](crate::Engine).

use std::fmt;
use std::iter::Peekable;

use crate::error::ParseError;

/// Prefix every flag argument must start with.
pub const FLAG_PREFIX: &str = "--";

/// Separator between the segments of a flag path.
pub const PATH_SEPARATOR: char = '.';

/// A `group.identifier.flag` path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlagPath {
    /// Group name, resolved against the registered templates.
    pub group: String,
    /// Caller-chosen identifier.
    pub identifier: String,
    /// Flag name within the group.
    pub flag: String,
}

impl FlagPath {
    /// Splits a path into its three segments.
    ///
    /// The path is split on the first two separators, so the flag segment
    /// may itself contain dots (and will then simply not match any
    /// registered flag).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedPath`] if there are fewer than three
    /// segments or any segment is empty.
    pub fn parse(path: &str) -> Result<Self, ParseError> {
        let mut segments = path.splitn(3, PATH_SEPARATOR);
        match (segments.next(), segments.next(), segments.next()) {
            (Some(group), Some(identifier), Some(flag))
                if !group.is_empty() && !identifier.is_empty() && !flag.is_empty() =>
            {
                Ok(Self {
                    group: group.to_string(),
                    identifier: identifier.to_string(),
                    flag: flag.to_string(),
                })
            }
            _ => Err(ParseError::MalformedPath {
                path: path.to_string(),
            }),
        }
    }
}

impl fmt::Display for FlagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.group, self.identifier, self.flag)
    }
}

/// One flag assignment extracted from the argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagToken {
    /// The argument(s) this token was read from: the flag itself, plus the
    /// value argument when the value was not attached with `=`.
    pub args: Vec<String>,
    /// The parsed flag path.
    pub path: FlagPath,
    /// The raw value text.
    pub value: String,
}

/// Iterator turning raw arguments into [`FlagToken`]s.
///
/// A flag written without `=` takes the next argument as its value unless
/// that argument starts with `--`. This means a value that itself starts
/// with `--` must be attached with `=`.
#[derive(Debug)]
pub struct Tokenizer<I: Iterator<Item = String>> {
    args: Peekable<I>,
}

impl<I: Iterator<Item = String>> Tokenizer<I> {
    /// Creates a tokenizer over `args` (without the program name).
    pub fn new(args: impl IntoIterator<Item = String, IntoIter = I>) -> Self {
        Self {
            args: args.into_iter().peekable(),
        }
    }

    fn read(&mut self, arg: String) -> Result<FlagToken, ParseError> {
        let Some(rest) = arg.strip_prefix(FLAG_PREFIX) else {
            return Err(ParseError::InvalidFormat { arg });
        };

        let (path, value, detached) = match rest.split_once('=') {
            Some((path, value)) => (path.to_string(), value.to_string(), None),
            None => {
                let value = self
                    .args
                    .next_if(|next| !next.starts_with(FLAG_PREFIX))
                    .ok_or_else(|| ParseError::MissingValue {
                        path: rest.to_string(),
                    })?;
                (rest.to_string(), value.clone(), Some(value))
            }
        };

        let path = FlagPath::parse(&path)?;
        let mut args = vec![arg];
        args.extend(detached);

        Ok(FlagToken { args, path, value })
    }
}

impl<I: Iterator<Item = String>> Iterator for Tokenizer<I> {
    type Item = Result<FlagToken, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let arg = self.args.next()?;
        Some(self.read(arg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(args: &[&str]) -> Result<Vec<FlagToken>, ParseError> {
        Tokenizer::new(args.iter().map(ToString::to_string)).collect()
    }

    mod flag_path {
        use super::*;

        #[test]
        fn splits_three_segments() {
            let path = FlagPath::parse("http.myserver.method").unwrap();
            assert_eq!(path.group, "http");
            assert_eq!(path.identifier, "myserver");
            assert_eq!(path.flag, "method");
            assert_eq!(path.to_string(), "http.myserver.method");
        }

        #[test]
        fn extra_dots_stay_in_flag_segment() {
            let path = FlagPath::parse("http.a.b.c").unwrap();
            assert_eq!(path.identifier, "a");
            assert_eq!(path.flag, "b.c");
        }

        #[test]
        fn rejects_two_segments() {
            let err = FlagPath::parse("http.onlytwo").unwrap_err();
            assert!(matches!(err, ParseError::MalformedPath { path } if path == "http.onlytwo"));
        }

        #[test]
        fn rejects_empty_segments() {
            assert!(FlagPath::parse("http..method").is_err());
            assert!(FlagPath::parse(".a.method").is_err());
            assert!(FlagPath::parse("http.a.").is_err());
            assert!(FlagPath::parse("").is_err());
        }
    }

    mod tokenizer {
        use super::*;

        #[test]
        fn attached_value() {
            let tokens = tokenize(&["--tcp.db.address=localhost:5432"]).unwrap();
            assert_eq!(tokens.len(), 1);
            assert_eq!(tokens[0].path.to_string(), "tcp.db.address");
            assert_eq!(tokens[0].value, "localhost:5432");
            assert_eq!(tokens[0].args, vec!["--tcp.db.address=localhost:5432"]);
        }

        #[test]
        fn value_splits_on_first_equals_only() {
            let tokens = tokenize(&["--http.a.header=X-Key=secret"]).unwrap();
            assert_eq!(tokens[0].value, "X-Key=secret");
        }

        #[test]
        fn empty_attached_value() {
            let tokens = tokenize(&["--http.a.body="]).unwrap();
            assert_eq!(tokens[0].value, "");
        }

        #[test]
        fn detached_value_from_next_argument() {
            let tokens = tokenize(&["--http.a.method", "POST", "--http.a.url=http://x"]).unwrap();
            assert_eq!(tokens.len(), 2);
            assert_eq!(tokens[0].value, "POST");
            assert_eq!(tokens[0].args, vec!["--http.a.method", "POST"]);
            assert_eq!(tokens[1].path.flag, "url");
        }

        #[test]
        fn missing_value_at_end() {
            let err = tokenize(&["--http.a.method"]).unwrap_err();
            assert!(matches!(err, ParseError::MissingValue { path } if path == "http.a.method"));
        }

        #[test]
        fn flag_like_value_is_never_consumed() {
            let err = tokenize(&["--http.a.method", "--http.a.url=http://x"]).unwrap_err();
            assert!(matches!(err, ParseError::MissingValue { .. }));
        }

        #[test]
        fn single_dash_value_is_consumed() {
            // Only the `--` prefix marks a flag, so `-5` is taken as a value.
            let tokens = tokenize(&["--tcp.a.retries", "-5"]).unwrap();
            assert_eq!(tokens[0].value, "-5");
        }

        #[test]
        fn negative_looking_double_dash_value_is_not_consumed() {
            // Known limitation: a value starting with `--` must use `=`.
            let err = tokenize(&["--tcp.a.label", "--5"]).unwrap_err();
            assert!(matches!(err, ParseError::MissingValue { .. }));

            let tokens = tokenize(&["--tcp.a.label=--5"]).unwrap();
            assert_eq!(tokens[0].value, "--5");
        }

        #[test]
        fn argument_without_prefix_is_invalid() {
            let err = tokenize(&["positional"]).unwrap_err();
            assert!(matches!(err, ParseError::InvalidFormat { arg } if arg == "positional"));

            let err = tokenize(&["-http.a.method=GET"]).unwrap_err();
            assert!(matches!(err, ParseError::InvalidFormat { .. }));
        }

        #[test]
        fn malformed_path_is_reported() {
            let err = tokenize(&["--http.onlytwo=value"]).unwrap_err();
            assert!(matches!(err, ParseError::MalformedPath { .. }));
        }

        #[test]
        fn each_argument_is_read_independently() {
            let mut tokenizer = Tokenizer::new(
                ["bad", "--http.a.method=GET"].iter().map(ToString::to_string),
            );
            assert!(tokenizer.next().unwrap().is_err());
            assert!(tokenizer.next().unwrap().is_ok());
        }
    }
}
