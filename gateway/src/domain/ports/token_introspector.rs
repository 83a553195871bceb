//! Driven port for validating bearer tokens with an identity provider.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AccessToken, IntrospectionClaims};

define_port_error! {
    /// Reasons a token could not be validated.
    ///
    /// `Inactive` is a verdict from the provider; every other variant means
    /// no verdict was obtained.
    pub enum TokenValidationError {
        /// The caller supplied no token.
        MissingToken => "Access token is required",
        /// The introspection endpoint is not configured.
        Configuration { message: String } => "{message}",
        /// The provider reported the token as inactive or expired.
        Inactive => "Token is not active or has expired",
        /// The introspection call failed before a verdict was received.
        Transport { message: String } => "Failed to validate token: {message}",
        /// The provider answered with a body that is not a claims object.
        MalformedResponse { message: String } => "Token validation error: {message}",
    }
}

/// Port for RFC 7662 token introspection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenIntrospector: Send + Sync {
    /// Validate `token` and return the provider's claims when it is active.
    ///
    /// Implementations must not issue a network call when misconfigured and
    /// must reject inactive tokens with [`TokenValidationError::Inactive`].
    async fn validate(
        &self,
        token: &AccessToken,
    ) -> Result<IntrospectionClaims, TokenValidationError>;
}
