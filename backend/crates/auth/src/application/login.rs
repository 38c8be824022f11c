//! Login Use Case
//!
//! Authenticates a user by password and opens or extends their session.
//! A user has at most one live session: a second login keeps the stored
//! `session_id` and only pushes `expires_at` forward.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::SessionId;
use platform::password::{ClearTextPassword, CredentialHasher};

use crate::application::config::AuthConfig;
use crate::domain::entity::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::Username;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
///
/// Carries only a token and its expiry; a fresh session and a refreshed
/// one look the same to the caller.
#[derive(Debug)]
pub struct LoginOutput {
    pub session_id: SessionId,
    pub expires_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository + SessionRepository,
{
    repo: Arc<R>,
    hasher: Arc<CredentialHasher>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository + SessionRepository,
{
    pub fn new(repo: Arc<R>, hasher: Arc<CredentialHasher>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            hasher,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Malformed input gets the same generic answer as a failed login,
        // so probing cannot tell "no such user" from "wrong password".
        let username =
            Username::new(input.username).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let record = self
            .repo
            .find_credentials_by_username(&username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %username, "Login for unknown username");
                AuthError::InvalidCredentials
            })?;

        if !self
            .hasher
            .verify(&password, record.password_hash.as_phc_string())
        {
            tracing::warn!(user_id = %record.user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

        // One atomic insert-or-refresh; the store keeps an existing
        // session_id and only rewrites the expiry.
        let session = self
            .repo
            .upsert_for_user(&Session::issue(record.user.id, ttl))
            .await?;

        tracing::info!(
            user_id = %record.user.id,
            session_id = %session.session_id,
            "User logged in"
        );

        Ok(LoginOutput {
            session_id: session.session_id,
            expires_at: session.expires_at,
        })
    }
}
