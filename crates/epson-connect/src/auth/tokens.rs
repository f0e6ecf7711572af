//! Token types and session token state.

use chrono::{DateTime, Utc};
use std::fmt;

/// An access token for authenticated API requests.
///
/// Access tokens are short-lived credentials used to authorize requests
/// to the Epson Connect API.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AccessToken(pub(crate) String);

impl AccessToken {
    /// Create a new access token.
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token issued on the first successful authentication.
///
/// The observed renewal flow repeats the password grant rather than spending
/// this token, but it is retained for the lifetime of the session.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct RefreshToken(pub(crate) String);

impl RefreshToken {
    /// Create a new refresh token.
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// Mutable token state owned by a session.
///
/// Invariants:
/// - `access_token` is `None` iff the session has never authenticated or has
///   been explicitly deauthenticated.
/// - `expires_at` is only trusted while `access_token` is `Some`.
#[derive(Debug)]
pub(crate) struct TokenState {
    pub access_token: Option<AccessToken>,
    pub refresh_token: Option<RefreshToken>,
    pub expires_at: DateTime<Utc>,
    pub subject_id: String,
}

impl TokenState {
    /// An empty, never-authenticated state.
    pub fn new() -> Self {
        Self {
            access_token: None,
            refresh_token: None,
            expires_at: DateTime::<Utc>::UNIX_EPOCH,
            subject_id: String::new(),
        }
    }

    /// Whether the held access token can still be used as-is.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.access_token.is_some() && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("at-supersecret-value");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn refresh_token_hides_value_in_debug() {
        let token = RefreshToken::new("rf-supersecret-value");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn new_state_is_never_fresh() {
        let state = TokenState::new();
        assert!(!state.is_fresh(Utc::now()));
    }

    #[test]
    fn future_expiry_without_token_is_not_fresh() {
        let mut state = TokenState::new();
        state.expires_at = Utc::now() + Duration::hours(1);
        assert!(!state.is_fresh(Utc::now()));
    }

    #[test]
    fn token_with_future_expiry_is_fresh() {
        let now = Utc::now();
        let mut state = TokenState::new();
        state.access_token = Some(AccessToken::new("at-1"));
        state.expires_at = now + Duration::seconds(3600);
        assert!(state.is_fresh(now));
    }

    #[test]
    fn token_with_past_expiry_is_stale() {
        let now = Utc::now();
        let mut state = TokenState::new();
        state.access_token = Some(AccessToken::new("at-1"));
        state.expires_at = now - Duration::seconds(1);
        assert!(!state.is_fresh(now));
    }
}
