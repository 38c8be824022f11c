//! Email Value Object
//!
//! Shape validation only: one `@` with non-empty sides, no whitespace,
//! bounded length. Stored as entered; uniqueness is enforced by the store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for an email address (RFC 5321 limit)
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Error returned when email validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Email is empty
    Empty,

    /// Email is too long (maximum: EMAIL_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// Email does not look like `local@domain`
    InvalidFormat,
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Email cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Email is too long ({length} chars, maximum {max})")
            }
            Self::InvalidFormat => write!(f, "Email must look like local@domain"),
        }
    }
}

impl std::error::Error for EmailError {}

/// Validated email address
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new Email from raw input
    pub fn new(input: impl Into<String>) -> Result<Self, EmailError> {
        let value = input.into();

        if value.trim().is_empty() {
            return Err(EmailError::Empty);
        }

        let char_count = value.chars().count();
        if char_count > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong {
                length: char_count,
                max: EMAIL_MAX_LENGTH,
            });
        }

        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(EmailError::InvalidFormat);
        }

        // Exactly one '@', both sides non-empty
        let Some((local, domain)) = value.split_once('@') else {
            return Err(EmailError::InvalidFormat);
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(value))
    }

    /// Re-validate a value loaded from the database
    pub fn from_db(value: &str) -> Result<Self, EmailError> {
        Self::new(value)
    }

    /// Get the email as stored
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

impl fmt::Debug for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Email({:?})", self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
