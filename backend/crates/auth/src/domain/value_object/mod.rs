//! Value Objects
//!
//! Validated domain primitives.

pub mod email;
pub mod user_id;
pub mod username;

pub use email::{Email, EmailError};
pub use user_id::UserId;
pub use username::{Username, UsernameError};
