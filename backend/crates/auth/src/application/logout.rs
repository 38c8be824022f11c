//! Logout Use Case
//!
//! Revokes a session. Not idempotent: a second logout with the same token
//! answers `SessionNotFound`.

use std::sync::Arc;

use kernel::id::SessionId;

use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        // A token that does not even parse as a session id behaves like a
        // missing session; the token format is opaque to callers.
        let session_id: SessionId = token.parse().map_err(|_| AuthError::SessionNotFound)?;

        let deleted = self.session_repo.delete(session_id).await?;
        if deleted == 0 {
            return Err(AuthError::SessionNotFound);
        }

        tracing::info!(session_id = %session_id, "User logged out");
        Ok(())
    }
}
