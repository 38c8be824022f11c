//! List Users Use Case

use std::sync::Arc;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// List users use case
pub struct ListUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// List every user's public fields; an empty directory is a valid,
    /// non-error result.
    pub async fn execute(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list_users().await
    }
}
