//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the infrastructure
//! layer. Both traits demand storage-level atomicity: uniqueness is enforced
//! by constraints, not by read-then-write sequences, so the loser of a
//! concurrent race gets a conflict error instead of corrupting state.

use chrono::{DateTime, Utc};
use kernel::id::SessionId;

use crate::domain::entity::{NewUser, Session, User, UserRecord};
use crate::domain::value_object::{UserId, Username};
use crate::error::AuthResult;

/// User directory trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and their first session in one transaction.
    ///
    /// Either both rows commit or neither does. Duplicate username/email
    /// surfaces as the matching conflict error.
    async fn create_user_with_session(
        &self,
        new_user: &NewUser,
        session_id: SessionId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<(User, Session)>;

    /// Find a user by id
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find a user with their credential hash, by username
    async fn find_credentials_by_username(
        &self,
        username: &Username,
    ) -> AuthResult<Option<UserRecord>>;

    /// Check if a username is taken
    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool>;

    /// List all users
    async fn list_users(&self) -> AuthResult<Vec<User>>;
}

/// Session store trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Insert-or-refresh the session for `session.user_id`, atomically.
    ///
    /// If the user already has a session, its `session_id` is kept and only
    /// `expires_at` moves forward; otherwise the given session is inserted.
    /// Returns the surviving row.
    async fn upsert_for_user(&self, session: &Session) -> AuthResult<Session>;

    /// Find a session by its token
    async fn find_by_session_id(&self, session_id: SessionId) -> AuthResult<Option<Session>>;

    /// Delete a session, returning the number of rows removed
    async fn delete(&self, session_id: SessionId) -> AuthResult<u64>;

    /// Remove all sessions past their expiry
    async fn delete_expired(&self) -> AuthResult<u64>;
}
