//! Guard configuration: storage keys, redirect target, and check cadence.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

/// Storage key holding the raw bearer token.
pub const DEFAULT_TOKEN_KEY: &str = "accessToken";
/// Storage key holding the JSON identity snapshot.
pub const DEFAULT_IDENTITY_KEY: &str = "loggedInUser";
/// Route the guard redirects to when access is denied.
pub const DEFAULT_AUTH_PATH: &str = "/auth";
/// Interval of the periodic expiry check while a protected view is mounted.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Tunables for [`crate::SessionGuard`] and [`crate::TokenStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardConfig {
    pub token_key: String,
    pub identity_key: String,
    pub auth_path: String,
    pub check_interval: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            identity_key: DEFAULT_IDENTITY_KEY.to_owned(),
            auth_path: DEFAULT_AUTH_PATH.to_owned(),
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

impl GuardConfig {
    #[must_use]
    pub fn with_keys(mut self, token_key: impl Into<String>, identity_key: impl Into<String>) -> Self {
        self.token_key = token_key.into();
        self.identity_key = identity_key.into();
        self
    }

    #[must_use]
    pub fn with_auth_path(mut self, auth_path: impl Into<String>) -> Self {
        self.auth_path = auth_path.into();
        self
    }

    /// Set the periodic check interval. Zero is bumped to one millisecond so the
    /// watch loop can never spin.
    #[must_use]
    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval.max(Duration::from_millis(1));
        self
    }
}
