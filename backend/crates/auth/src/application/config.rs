//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

pub use platform::password::HasherConfig;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session lifetime from issue/refresh (24 hours)
    pub session_ttl: Duration,
    /// Credential hasher cost parameters
    pub hasher: HasherConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            hasher: HasherConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Config with a custom TTL expressed in hours
    pub fn with_ttl_hours(hours: u64) -> Self {
        Self {
            session_ttl: Duration::from_secs(hours * 3600),
            ..Default::default()
        }
    }

    /// Fast hashing for tests. Not for production use.
    #[cfg(test)]
    pub fn insecure_fast() -> Self {
        Self {
            hasher: HasherConfig::insecure_fast(),
            ..Default::default()
        }
    }
}
