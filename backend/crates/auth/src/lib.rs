//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User registration with username + email + password
//! - Password login issuing opaque session tokens (UUID v4)
//! - At most one live session per user; login extends the existing session
//! - Session revocation and token-to-user resolution
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; any non-empty password is accepted
//! - Generic `InvalidCredentials` answer, no username enumeration
//! - Expired sessions are rejected and purged, never honored

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::router::{auth_router, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
