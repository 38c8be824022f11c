//! Register Use Case
//!
//! Creates a new user and immediately opens their first session, in one
//! storage transaction: there is no state with a user row but no session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::SessionId;
use platform::password::{ClearTextPassword, CredentialHasher};

use crate::application::config::AuthConfig;
use crate::domain::entity::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    /// Bearer token for the freshly opened session
    pub session_id: SessionId,
    /// Absolute expiry, UTC
    pub expires_at: DateTime<Utc>,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<CredentialHasher>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<CredentialHasher>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            hasher,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        // Validate fields
        let username =
            Username::new(input.username).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        // Fast-path conflict check; the unique constraint still closes the
        // race when two registrations carry the same username concurrently.
        if self.user_repo.exists_by_username(&username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = self
            .hasher
            .hash(&password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

        let new_user = NewUser {
            username,
            email,
            password_hash,
        };

        let (user, session) = self
            .user_repo
            .create_user_with_session(&new_user, SessionId::new(), Utc::now() + ttl)
            .await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "User registered"
        );

        Ok(RegisterOutput {
            session_id: session.session_id,
            expires_at: session.expires_at,
        })
    }
}
