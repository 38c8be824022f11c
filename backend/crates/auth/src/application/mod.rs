//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod register;
pub mod resolve_session;

// Re-exports
pub use config::AuthConfig;
pub use list_users::ListUsersUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use resolve_session::ResolveSessionUseCase;
