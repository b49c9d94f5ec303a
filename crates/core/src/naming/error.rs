//! Naming rule violation errors.

use thiserror::Error;

/// Storage name validation errors.
///
/// Each variant identifies the specific naming rule that was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// Name is shorter than the minimum length.
    #[error("name '{name}' is shorter than {min} characters")]
    TooShort {
        /// The offending name.
        name: String,
        /// Minimum allowed length.
        min: usize,
    },

    /// Name is longer than the maximum length.
    #[error("name '{name}' is longer than {max} characters")]
    TooLong {
        /// The offending name.
        name: String,
        /// Maximum allowed length.
        max: usize,
    },

    /// Name starts with a character the resource kind does not permit.
    #[error("name '{name}' must start with {expected}")]
    InvalidStart {
        /// The offending name.
        name: String,
        /// Description of the permitted start character class.
        expected: &'static str,
    },

    /// Name contains a character outside the permitted set.
    #[error("name '{name}' contains disallowed character '{character}'")]
    InvalidCharacter {
        /// The offending name.
        name: String,
        /// The disallowed character.
        character: char,
    },

    /// Name has a leading, trailing, or doubled hyphen.
    #[error("name '{name}' has a leading, trailing, or consecutive hyphen")]
    HyphenPlacement {
        /// The offending name.
        name: String,
    },

    /// Name collides with a reserved word.
    #[error("name '{name}' is reserved")]
    Reserved {
        /// The offending name.
        name: String,
    },
}
