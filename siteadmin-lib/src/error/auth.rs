//! Authentication error types

/// Errors that can occur while logging in or registering.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the username/password pair.
    #[error("{message}")]
    InvalidCredentials { message: String },

    /// Registration was refused by the backend.
    #[error("Registration failed: {message}")]
    RegistrationFailed { message: String },

    /// No token has been stored; log in first.
    #[error("Not logged in")]
    MissingToken,

    /// The stored token was rejected by the backend.
    #[error("Token rejected: {message}")]
    TokenRejected { message: String },

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}

impl AuthError {
    /// Message shown when the backend gives no reason for a failed login.
    pub const DEFAULT_LOGIN_FAILURE: &'static str = "Wrong Username or Password";

    /// Creates an invalid credentials error with the default message.
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            message: Self::DEFAULT_LOGIN_FAILURE.to_string(),
        }
    }
}
