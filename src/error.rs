//! Error types for registration, parsing and lookups.

use thiserror::Error;

use crate::value::FlagType;

/// Error type for value conversion and storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// A token could not be converted to the flag's type.
    #[error("invalid {kind} value '{input}': {reason}")]
    Invalid {
        /// Declared type of the flag
        kind: FlagType,
        /// The offending token
        input: String,
        /// Underlying conversion message
        reason: String,
    },

    /// A value of the wrong type was handed to an adapter.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Type the adapter stores
        expected: FlagType,
        /// Type of the supplied value
        actual: FlagType,
    },
}

/// Error type for [`Engine::parse`](crate::Engine::parse).
///
/// Structural and value errors always abort the parse. Unknown group and
/// flag errors are only raised under
/// [`ParseBehavior::ExitOnError`](crate::ParseBehavior::ExitOnError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An argument does not start with `--`.
    #[error("invalid flag format: '{arg}'")]
    InvalidFormat {
        /// The offending argument
        arg: String,
    },

    /// A flag without `=` has no value token after it.
    #[error("missing value for flag: '--{path}'")]
    MissingValue {
        /// The flag path as written
        path: String,
    },

    /// A flag path does not have the `group.identifier.flag` shape.
    #[error("malformed flag path '--{path}': expected --<group>.<identifier>.<flag>")]
    MalformedPath {
        /// The flag path as written
        path: String,
    },

    /// The group is not registered.
    #[error("unknown group '{group}' (identifier '{identifier}')")]
    UnknownGroup {
        /// Group segment of the path
        group: String,
        /// Identifier segment of the path
        identifier: String,
    },

    /// The group is registered but has no such flag.
    #[error("unknown flag '{flag}' in group '{group}' (identifier '{identifier}')")]
    UnknownFlag {
        /// Group segment of the path
        group: String,
        /// Identifier segment of the path
        identifier: String,
        /// Flag segment of the path
        flag: String,
    },

    /// A recognised flag was given a value that does not convert.
    #[error("failed to parse '--{path}': {source}")]
    InvalidValue {
        /// The flag path as written
        path: String,
        /// Underlying conversion error
        #[source]
        source: ValueError,
    },
}

/// Error type for typed getters on parsed instances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The flag has no value on this instance.
    #[error("flag '{flag}' not found")]
    NotFound {
        /// Requested flag name
        flag: String,
    },

    /// The flag holds a value of another type.
    #[error("flag '{flag}' has type {actual}, not {expected}")]
    WrongType {
        /// Requested flag name
        flag: String,
        /// Type requested by the getter
        expected: FlagType,
        /// Type actually stored
        actual: FlagType,
    },
}

/// Error type for flag and group registration.
///
/// These indicate a mistake in the host program rather than bad user input.
/// The typed registration helpers panic with this error; the fallible
/// variants ([`Engine::try_group`](crate::Engine::try_group),
/// [`GroupTemplate::define`](crate::GroupTemplate::define)) return it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A group with this name already exists.
    #[error("group '{0}' is already registered")]
    DuplicateGroup(String),

    /// The group already defines a flag with this name.
    #[error("flag '{flag}' is already registered in group '{group}'")]
    DuplicateFlag {
        /// Group name
        group: String,
        /// Flag name
        flag: String,
    },

    /// A group or flag name is empty or contains the path separator.
    #[error("invalid name '{0}': names must be non-empty and must not contain '.'")]
    InvalidName(String),

    /// A textual default does not convert to the flag's type.
    #[error("invalid default for flag '{flag}' in group '{group}': {source}")]
    InvalidDefault {
        /// Group name
        group: String,
        /// Flag name
        flag: String,
        /// Underlying conversion error
        #[source]
        source: ValueError,
    },
}
