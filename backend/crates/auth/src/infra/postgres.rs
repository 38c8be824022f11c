//! PostgreSQL Repository Implementations
//!
//! All uniqueness and one-session-per-user invariants live in the schema:
//! unique constraints on `users.username`, `users.email`,
//! `sessions.session_id` and `sessions.user_id`, plus `ON DELETE CASCADE`
//! from sessions to users. The queries here lean on those constraints
//! instead of read-then-write sequences.

use chrono::{DateTime, Utc};
use kernel::id::SessionId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{NewUser, Session, User, UserRecord};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{Email, UserId, Username};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

/// Map a unique-constraint violation onto the matching conflict variant
///
/// PostgreSQL error 23505 carries the constraint name, which tells us which
/// uniqueness invariant the caller tripped over.
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some("users_username_key") => AuthError::UsernameTaken,
                Some("users_email_key") => AuthError::EmailTaken,
                _ => AuthError::Database(err),
            };
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create_user_with_session(
        &self,
        new_user: &NewUser,
        session_id: SessionId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<(User, Session)> {
        let mut tx = self.pool.begin().await?;

        let user_row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email
            "#,
        )
        .bind(new_user.username.as_str())
        .bind(new_user.email.as_str())
        .bind(new_user.password_hash.as_phc_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        let session_row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (session_id, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING session_id, user_id, expires_at
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(user_row.id)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((user_row.into_user()?, session_row.into_session()))
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_credentials_by_username(
        &self,
        username: &Username,
    ) -> AuthResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT id, username, email, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_users(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn upsert_for_user(&self, session: &Session) -> AuthResult<Session> {
        // One statement covers both login branches: first login inserts,
        // repeat login keeps the stored session_id and moves the expiry.
        // The unique constraint on user_id makes concurrent logins converge
        // on a single row.
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (session_id, user_id, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET expires_at = EXCLUDED.expires_at
            RETURNING session_id, user_id, expires_at
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_i64())
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_session())
    }

    async fn find_by_session_id(&self, session_id: SessionId) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_id, user_id, expires_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_session()))
    }

    async fn delete(&self, session_id: SessionId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn delete_expired(&self) -> AuthResult<u64> {
        self.cleanup_expired().await
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let username = Username::from_db(&self.username)
            .map_err(|e| AuthError::Internal(format!("Invalid stored username: {}", e)))?;
        let email = Email::from_db(&self.email)
            .map_err(|e| AuthError::Internal(format!("Invalid stored email: {}", e)))?;

        Ok(User {
            id: UserId::from_i64(self.id),
            username,
            email,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
}

impl CredentialsRow {
    fn into_record(self) -> AuthResult<UserRecord> {
        let user = UserRow {
            id: self.id,
            username: self.username,
            email: self.email,
        }
        .into_user()?;

        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid stored password hash: {}", e)))?;

        Ok(UserRecord {
            user,
            password_hash,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: i64,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_i64(self.user_id),
            expires_at: self.expires_at,
        }
    }
}
