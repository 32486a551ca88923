//! TokenProvider trait and AccessToken

use async_trait::async_trait;

use crate::error::AuthError;

/// A bearer token issued by the backend's login endpoint.
///
/// Tokens are opaque to the client; they are not refreshed or rotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The bearer token used for API authentication.
    pub access_token: String,
}

impl AccessToken {
    /// Creates a new access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Returns the token as a bearer authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Trait for providing access tokens to the client.
///
/// The client calls `get_token` before each authenticated request.
/// Implementations decide where the token lives (memory, a settings store,
/// an environment variable).
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use siteadmin_lib::auth::{AccessToken, TokenProvider};
/// use siteadmin_lib::error::AuthError;
///
/// struct EnvTokenProvider;
///
/// #[async_trait]
/// impl TokenProvider for EnvTokenProvider {
///     async fn get_token(&self) -> Result<AccessToken, AuthError> {
///         std::env::var("SITEADMIN_TOKEN")
///             .map(AccessToken::new)
///             .map_err(|_| AuthError::MissingToken)
///     }
/// }
/// ```
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets the current access token.
    async fn get_token(&self) -> Result<AccessToken, AuthError>;
}

/// A token provider that always returns the same token.
///
/// # Example
///
/// ```
/// use siteadmin_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-access-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a new static token provider with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }

    /// Creates a new static token provider from an existing AccessToken.
    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        Ok(self.token.clone())
    }
}
