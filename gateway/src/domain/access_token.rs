//! Opaque bearer credential supplied by the upstream caller.
//!
//! The token is never inspected, only forwarded. `Debug` output is redacted
//! so the credential cannot leak through structured log fields.

use std::fmt;

/// Validation errors for [`AccessToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessTokenValidationError {
    /// The token was empty.
    #[error("Access token is required")]
    Empty,
}

/// Non-empty OAuth bearer token.
///
/// # Examples
/// ```
/// use gateway::domain::AccessToken;
///
/// let token = AccessToken::new("eyJhbGc").expect("non-empty token");
/// assert_eq!(token.as_str(), "eyJhbGc");
/// assert_eq!(format!("{token:?}"), "AccessToken(<redacted>)");
/// assert!(AccessToken::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a caller-supplied token, rejecting empty input.
    pub fn new(raw: impl Into<String>) -> Result<Self, AccessTokenValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(AccessTokenValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Raw token text, for placing on the wire.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl TryFrom<String> for AccessToken {
    type Error = AccessTokenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
