//! Unit tests for the auth crate
//!
//! The use cases run against an in-memory repository double. The double
//! mirrors the storage contract sequentially; the concurrent half of the
//! uniqueness invariants is carried by the Postgres constraints.

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Duration, Utc};
    use kernel::id::SessionId;
    use platform::password::{CredentialHasher, HashedPassword};

    use crate::application::AuthConfig;
    use crate::domain::entity::{NewUser, Session, User, UserRecord};
    use crate::domain::repository::{SessionRepository, UserRepository};
    use crate::domain::value_object::{Email, UserId, Username};
    use crate::error::{AuthError, AuthResult};

    #[derive(Default)]
    struct MemState {
        next_user_id: i64,
        users: Vec<MemUser>,
        sessions: Vec<Session>,
    }

    struct MemUser {
        id: i64,
        username: String,
        email: String,
        password_hash: String,
    }

    impl MemUser {
        fn to_user(&self) -> User {
            User {
                id: UserId::from_i64(self.id),
                username: Username::new(self.username.clone()).unwrap(),
                email: Email::new(self.email.clone()).unwrap(),
            }
        }
    }

    /// In-memory double for both repository traits
    #[derive(Clone, Default)]
    pub struct MemRepository {
        inner: Arc<Mutex<MemState>>,
    }

    impl MemRepository {
        pub fn user_count(&self) -> usize {
            self.inner.lock().unwrap().users.len()
        }

        pub fn session_count(&self) -> usize {
            self.inner.lock().unwrap().sessions.len()
        }

        /// Backdate a stored session so it reads as expired
        pub fn force_expire(&self, session_id: SessionId) {
            let mut state = self.inner.lock().unwrap();
            let session = state
                .sessions
                .iter_mut()
                .find(|s| s.session_id == session_id)
                .expect("session to expire");
            session.expires_at = Utc::now() - Duration::seconds(1);
        }

        /// Drop a user row without cascading, to fabricate an orphan
        pub fn remove_user_without_cascade(&self, user_id: UserId) {
            let mut state = self.inner.lock().unwrap();
            state.users.retain(|u| u.id != user_id.as_i64());
        }
    }

    impl UserRepository for MemRepository {
        async fn create_user_with_session(
            &self,
            new_user: &NewUser,
            session_id: SessionId,
            expires_at: DateTime<Utc>,
        ) -> AuthResult<(User, Session)> {
            let mut state = self.inner.lock().unwrap();

            if state
                .users
                .iter()
                .any(|u| u.username == new_user.username.as_str())
            {
                return Err(AuthError::UsernameTaken);
            }
            if state.users.iter().any(|u| u.email == new_user.email.as_str()) {
                return Err(AuthError::EmailTaken);
            }

            state.next_user_id += 1;
            let user = MemUser {
                id: state.next_user_id,
                username: new_user.username.as_str().to_string(),
                email: new_user.email.as_str().to_string(),
                password_hash: new_user.password_hash.as_phc_string().to_string(),
            };
            let session = Session {
                session_id,
                user_id: UserId::from_i64(user.id),
                expires_at,
            };

            let public = user.to_user();
            state.users.push(user);
            state.sessions.push(session.clone());

            Ok((public, session))
        }

        async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
            let state = self.inner.lock().unwrap();
            Ok(state
                .users
                .iter()
                .find(|u| u.id == user_id.as_i64())
                .map(|u| u.to_user()))
        }

        async fn find_credentials_by_username(
            &self,
            username: &Username,
        ) -> AuthResult<Option<UserRecord>> {
            let state = self.inner.lock().unwrap();
            Ok(state
                .users
                .iter()
                .find(|u| u.username == username.as_str())
                .map(|u| UserRecord {
                    user: u.to_user(),
                    password_hash: HashedPassword::from_phc_string(u.password_hash.clone())
                        .unwrap(),
                }))
        }

        async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
            let state = self.inner.lock().unwrap();
            Ok(state.users.iter().any(|u| u.username == username.as_str()))
        }

        async fn list_users(&self) -> AuthResult<Vec<User>> {
            let state = self.inner.lock().unwrap();
            Ok(state.users.iter().map(|u| u.to_user()).collect())
        }
    }

    impl SessionRepository for MemRepository {
        async fn upsert_for_user(&self, session: &Session) -> AuthResult<Session> {
            let mut state = self.inner.lock().unwrap();

            if let Some(existing) = state
                .sessions
                .iter_mut()
                .find(|s| s.user_id == session.user_id)
            {
                existing.expires_at = session.expires_at;
                return Ok(existing.clone());
            }

            state.sessions.push(session.clone());
            Ok(session.clone())
        }

        async fn find_by_session_id(&self, session_id: SessionId) -> AuthResult<Option<Session>> {
            let state = self.inner.lock().unwrap();
            Ok(state
                .sessions
                .iter()
                .find(|s| s.session_id == session_id)
                .cloned())
        }

        async fn delete(&self, session_id: SessionId) -> AuthResult<u64> {
            let mut state = self.inner.lock().unwrap();
            let before = state.sessions.len();
            state.sessions.retain(|s| s.session_id != session_id);
            Ok((before - state.sessions.len()) as u64)
        }

        async fn delete_expired(&self) -> AuthResult<u64> {
            let mut state = self.inner.lock().unwrap();
            let now = Utc::now();
            let before = state.sessions.len();
            state.sessions.retain(|s| s.expires_at >= now);
            Ok((before - state.sessions.len()) as u64)
        }
    }

    /// Everything a use-case test needs
    pub struct Fixture {
        pub repo: Arc<MemRepository>,
        pub config: Arc<AuthConfig>,
        pub hasher: Arc<CredentialHasher>,
    }

    impl Fixture {
        pub fn new() -> Self {
            let config = AuthConfig::insecure_fast();
            let hasher = CredentialHasher::new(config.hasher).unwrap();
            Self {
                repo: Arc::new(MemRepository::default()),
                config: Arc::new(config),
                hasher: Arc::new(hasher),
            }
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use super::support::Fixture;
    use crate::application::{
        ListUsersUseCase, LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterOutput,
        RegisterUseCase, ResolveSessionUseCase,
    };
    use crate::domain::entity::User;
    use crate::error::{AuthError, AuthResult};

    async fn register(fx: &Fixture, username: &str, email: &str, password: &str) -> AuthResult<RegisterOutput> {
        RegisterUseCase::new(fx.repo.clone(), fx.hasher.clone(), fx.config.clone())
            .execute(RegisterInput {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
    }

    async fn login(fx: &Fixture, username: &str, password: &str) -> AuthResult<crate::application::LoginOutput> {
        LoginUseCase::new(fx.repo.clone(), fx.hasher.clone(), fx.config.clone())
            .execute(LoginInput {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
    }

    async fn resolve(fx: &Fixture, token: &str) -> AuthResult<User> {
        ResolveSessionUseCase::new(fx.repo.clone()).execute(token).await
    }

    async fn logout(fx: &Fixture, token: &str) -> AuthResult<()> {
        LogoutUseCase::new(fx.repo.clone()).execute(token).await
    }

    #[tokio::test]
    async fn register_then_resolve_returns_matching_user() {
        let fx = Fixture::new();

        let output = register(&fx, "alice", "a@x.com", "password-one").await.unwrap();

        let user = resolve(&fx, &output.session_id.to_string()).await.unwrap();
        assert_eq!(user.username.as_str(), "alice");
        assert_eq!(user.email.as_str(), "a@x.com");
        assert_eq!(user.id.as_i64(), 1);
    }

    #[tokio::test]
    async fn register_duplicate_username_conflicts_and_adds_no_rows() {
        let fx = Fixture::new();

        register(&fx, "alice", "a@x.com", "password-one").await.unwrap();
        let err = register(&fx, "alice", "other@x.com", "password-two")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UsernameTaken));
        assert_eq!(fx.repo.user_count(), 1);
        assert_eq!(fx.repo.session_count(), 1);
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let fx = Fixture::new();

        register(&fx, "alice", "a@x.com", "password-one").await.unwrap();
        let err = register(&fx, "bob", "a@x.com", "password-two")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(fx.repo.user_count(), 1);
    }

    #[tokio::test]
    async fn register_rejects_invalid_fields() {
        let fx = Fixture::new();

        let err = register(&fx, "", "a@x.com", "password-one").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = register(&fx, "alice", "not-an-email", "password-one")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = register(&fx, "alice", "a@x.com", "").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        assert_eq!(fx.repo.user_count(), 0);
    }

    #[tokio::test]
    async fn register_accepts_any_nonempty_password() {
        let fx = Fixture::new();

        let output = register(&fx, "alice", "a@x.com", "pw1").await.unwrap();

        let user = resolve(&fx, &output.session_id.to_string()).await.unwrap();
        assert_eq!(user.username.as_str(), "alice");

        let relogin = login(&fx, "alice", "pw1").await.unwrap();
        assert_eq!(relogin.session_id, output.session_id);
    }

    #[tokio::test]
    async fn username_round_trips_as_stored() {
        let fx = Fixture::new();

        // Interior whitespace is not normalized away anywhere in the path.
        register(&fx, "alice smith", "a@x.com", "pw1").await.unwrap();

        let session = login(&fx, "alice smith", "pw1").await.unwrap();
        let user = resolve(&fx, &session.session_id.to_string()).await.unwrap();
        assert_eq!(user.username.as_str(), "alice smith");
    }

    #[tokio::test]
    async fn login_wrong_password_is_generic_and_touches_no_session() {
        let fx = Fixture::new();

        register(&fx, "alice", "a@x.com", "password-one").await.unwrap();
        let bob = register(&fx, "bob", "b@x.com", "password-two").await.unwrap();
        logout(&fx, &bob.session_id.to_string()).await.unwrap();

        // bob has no session now; a wrong password must not create one
        let err = login(&fx, "bob", "wrong-password").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(fx.repo.session_count(), 1); // only alice's
    }

    #[tokio::test]
    async fn login_unknown_username_is_indistinguishable_from_wrong_password() {
        let fx = Fixture::new();
        register(&fx, "alice", "a@x.com", "password-one").await.unwrap();

        let unknown = login(&fx, "nobody", "password-one").await.unwrap_err();
        let wrong = login(&fx, "alice", "wrong-password!").await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn repeat_login_keeps_session_id_and_extends_expiry() {
        let fx = Fixture::new();
        register(&fx, "alice", "a@x.com", "password-one").await.unwrap();

        let first = login(&fx, "alice", "password-one").await.unwrap();
        let second = login(&fx, "alice", "password-one").await.unwrap();

        assert_eq!(first.session_id, second.session_id);
        assert!(second.expires_at >= first.expires_at);
        assert_eq!(fx.repo.session_count(), 1);
    }

    #[tokio::test]
    async fn login_after_logout_issues_a_fresh_token() {
        let fx = Fixture::new();
        let registered = register(&fx, "alice", "a@x.com", "password-one").await.unwrap();

        logout(&fx, &registered.session_id.to_string()).await.unwrap();
        let relogged = login(&fx, "alice", "password-one").await.unwrap();

        assert_ne!(relogged.session_id, registered.session_id);
    }

    #[tokio::test]
    async fn logout_then_resolve_is_not_found() {
        let fx = Fixture::new();
        let output = register(&fx, "alice", "a@x.com", "password-one").await.unwrap();
        let token = output.session_id.to_string();

        logout(&fx, &token).await.unwrap();

        let err = resolve(&fx, &token).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound));
    }

    #[tokio::test]
    async fn second_logout_is_not_found() {
        let fx = Fixture::new();
        let output = register(&fx, "alice", "a@x.com", "password-one").await.unwrap();
        let token = output.session_id.to_string();

        logout(&fx, &token).await.unwrap();
        let err = logout(&fx, &token).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound));
    }

    #[tokio::test]
    async fn garbage_tokens_read_as_missing_sessions() {
        let fx = Fixture::new();

        let err = logout(&fx, "not-a-uuid").await.unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound));

        let err = resolve(&fx, "not-a-uuid").await.unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound));
    }

    #[tokio::test]
    async fn expired_session_is_rejected_and_purged() {
        let fx = Fixture::new();
        let output = register(&fx, "alice", "a@x.com", "password-one").await.unwrap();

        fx.repo.force_expire(output.session_id);

        let err = resolve(&fx, &output.session_id.to_string()).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound));
        assert_eq!(fx.repo.session_count(), 0);
    }

    #[tokio::test]
    async fn orphaned_session_surfaces_as_internal_fault() {
        let fx = Fixture::new();
        let output = register(&fx, "alice", "a@x.com", "password-one").await.unwrap();

        let user = resolve(&fx, &output.session_id.to_string()).await.unwrap();
        fx.repo.remove_user_without_cascade(user.id);

        let err = resolve(&fx, &output.session_id.to_string()).await.unwrap_err();
        assert!(matches!(err, AuthError::OrphanedSession(_)));
    }

    #[tokio::test]
    async fn list_users_returns_public_fields_and_tolerates_empty() {
        let fx = Fixture::new();
        let list = ListUsersUseCase::new(fx.repo.clone()).execute().await.unwrap();
        assert!(list.is_empty());

        register(&fx, "alice", "a@x.com", "password-one").await.unwrap();
        register(&fx, "bob", "b@x.com", "password-two").await.unwrap();

        let list = ListUsersUseCase::new(fx.repo.clone()).execute().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].username.as_str(), "alice");
        assert_eq!(list[1].username.as_str(), "bob");
    }

    #[tokio::test]
    async fn full_lifecycle_scenario() {
        let fx = Fixture::new();

        // register -> session S1
        let s1 = register(&fx, "alice", "a@x.com", "password-one").await.unwrap();

        // login -> same session id, expiry moved forward
        let relogin = login(&fx, "alice", "password-one").await.unwrap();
        assert_eq!(relogin.session_id, s1.session_id);
        assert!(relogin.expires_at >= s1.expires_at);

        // logout -> resolve fails
        logout(&fx, &s1.session_id.to_string()).await.unwrap();
        let err = resolve(&fx, &s1.session_id.to_string()).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound));
    }
}
