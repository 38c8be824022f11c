//! API DTOs (Data Transfer Objects)
//!
//! One typed shape per operation; serialization decisions live here, not in
//! the use cases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{LoginOutput, RegisterOutput};
use crate::domain::entity::User;

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Session
// ============================================================================

/// Session response, shared by register and login
///
/// `expiresAt` serializes as ISO-8601 UTC.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

impl From<RegisterOutput> for SessionResponse {
    fn from(output: RegisterOutput) -> Self {
        Self {
            session_id: output.session_id.to_string(),
            expires_at: output.expires_at,
        }
    }
}

impl From<LoginOutput> for SessionResponse {
    fn from(output: LoginOutput) -> Self {
        Self {
            session_id: output.session_id.to_string(),
            expires_at: output.expires_at,
        }
    }
}

// ============================================================================
// Logout
// ============================================================================

/// Logout request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub session_id: String,
}

/// Logout confirmation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub message: String,
}

// ============================================================================
// Users
// ============================================================================

/// Public user fields; the password hash never appears here
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_i64(),
            username: user.username.into_inner(),
            email: user.email.into_inner(),
        }
    }
}
