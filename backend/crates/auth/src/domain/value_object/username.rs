//! Username Value Object
//!
//! Usernames are stored exactly as entered: no case folding, no Unicode
//! normalization, no charset restriction. Uniqueness is byte-wise and
//! enforced by the store.
//!
//! ## Invariants
//! - Non-empty
//! - At most 64 characters

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 64;

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Username is empty
    Empty,

    /// Username is too long (maximum: USERNAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
        }
    }
}

impl std::error::Error for UsernameError {}

/// Validated username
///
/// Case-sensitive: `Alice` and `alice` are distinct users.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new Username from raw input
    pub fn new(input: impl Into<String>) -> Result<Self, UsernameError> {
        let value = input.into();

        if value.is_empty() {
            return Err(UsernameError::Empty);
        }

        let char_count = value.chars().count();
        if char_count > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length: char_count,
                max: USERNAME_MAX_LENGTH,
            });
        }

        Ok(Self(value))
    }

    /// Re-validate a value loaded from the database
    pub fn from_db(value: &str) -> Result<Self, UsernameError> {
        Self::new(value)
    }

    /// Get the username as stored
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username({:?})", self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}
