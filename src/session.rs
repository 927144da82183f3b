//! Authenticated session context handed to backend adapters.
//!
//! The session is created once at sign-in and passed explicitly to the
//! adapters that need it; nothing reads credentials from ambient storage.

use std::fmt;

/// Bearer token issued by the backend at sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a token; blank tokens are treated as absent.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    /// Returns the raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Credentials of the signed-in user, or their absence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<BearerToken>,
}

impl Session {
    /// Creates a session holding a bearer token.
    #[must_use]
    pub const fn authenticated(token: BearerToken) -> Self {
        Self { token: Some(token) }
    }

    /// Creates a session without credentials.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { token: None }
    }

    /// Creates a session from an optional raw token.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        Self {
            token: token.and_then(BearerToken::new),
        }
    }

    /// Returns the bearer token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    /// Returns `true` when a token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
