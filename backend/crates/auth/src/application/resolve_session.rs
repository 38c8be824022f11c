//! Resolve Session Use Case
//!
//! Maps a bearer token to the owning user's public identity. Expired
//! sessions are rejected and purged here; the stored `expires_at` is a
//! hard limit, not advisory metadata.

use std::sync::Arc;

use kernel::id::SessionId;

use crate::domain::entity::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Resolve session use case
pub struct ResolveSessionUseCase<R>
where
    R: UserRepository + SessionRepository,
{
    repo: Arc<R>,
}

impl<R> ResolveSessionUseCase<R>
where
    R: UserRepository + SessionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Resolve a token to the user's public fields
    ///
    /// The password hash never appears in the output.
    pub async fn execute(&self, token: &str) -> AuthResult<User> {
        let session_id: SessionId = token.parse().map_err(|_| AuthError::SessionNotFound)?;

        let session = self
            .repo
            .find_by_session_id(session_id)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired() {
            self.repo.delete(session_id).await?;
            tracing::debug!(session_id = %session_id, "Rejected expired session");
            return Err(AuthError::SessionNotFound);
        }

        // A session whose user vanished means cascade delete was bypassed
        // somewhere; surface it loudly instead of a plain not-found.
        let user = self
            .repo
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::OrphanedSession(session_id))?;

        Ok(user)
    }
}
