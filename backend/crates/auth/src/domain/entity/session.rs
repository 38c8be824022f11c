//! Session Entity
//!
//! A session is a capability token bound to exactly one user. The
//! `session_id` (UUID v4) is the bearer token itself; the database's
//! surrogate row id never leaves the store.
//!
//! At most one session exists per user: login either creates the first
//! session or extends the existing one, keeping its `session_id`.

use chrono::{DateTime, Duration, Utc};
use kernel::id::SessionId;

use crate::domain::value_object::UserId;

/// Session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque unguessable token (UUID v4)
    pub session_id: SessionId,
    /// Owning user
    pub user_id: UserId,
    /// Absolute expiry, UTC
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Issue a fresh session for a user
    ///
    /// TTL is provided by the application layer (config), not hard-coded
    /// here.
    pub fn issue(user_id: UserId, ttl: Duration) -> Self {
        Self {
            session_id: SessionId::new(),
            user_id,
            expires_at: Utc::now() + ttl,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
