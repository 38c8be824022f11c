//! User Entity
//!
//! Identity rows in the user directory. `User` carries only public fields;
//! the stored password hash travels in [`UserRecord`] and never leaves the
//! application layer.

use platform::password::HashedPassword;

use crate::domain::value_object::{Email, UserId, Username};

/// User identity (public fields only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Surrogate key assigned by the directory on insert
    pub id: UserId,
    /// Globally unique, case-sensitive
    pub username: Username,
    /// Globally unique
    pub email: Email,
}

/// A user about to be inserted; the directory assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub password_hash: HashedPassword,
}

/// Directory row including the credential hash, for password verification
///
/// Only the login path sees this; everything user-facing works with the
/// inner [`User`].
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: HashedPassword,
}
