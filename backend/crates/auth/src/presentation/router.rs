//! Auth Routers

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router (`/register`, `/login`, `/logout`)
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .with_state(state)
}

/// Create the Users router (list, resolve-by-session)
pub fn users_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::list_users::<R>))
        .route("/{session_id}", get(handlers::resolve_user::<R>))
        .with_state(state)
}
