//! Username/password login against the backend's user endpoints

use serde::Deserialize;
use serde::Serialize;

use super::AccessToken;
use crate::error::AuthError;

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize, Default)]
struct ErrorResponse {
    error: Option<String>,
    message: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

/// Logs in to (or registers with) the backend.
///
/// Login posts the credentials to `/users/login` and returns the token from
/// the response body. Registration posts to `/users/register` and succeeds
/// on `201 Created`.
///
/// # Example
///
/// ```ignore
/// use siteadmin_lib::auth::LoginFlow;
///
/// let flow = LoginFlow::new("https://api.example.com");
/// let token = flow.login("admin", "secret").await?;
/// ```
#[derive(Debug, Clone)]
pub struct LoginFlow {
    base_url: String,
    http_client: reqwest::Client,
}

impl LoginFlow {
    /// Creates a new login flow for the given backend URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Uses a custom HTTP client.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Exchanges a username and password for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        log::debug!("POST /users/login as {}", username);
        let response = self
            .http_client
            .post(self.url("/users/login"))
            .json(&Credentials { username, password })
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::OK {
            let body: LoginResponse = response
                .json()
                .await
                .map_err(|e| AuthError::Parse(e.to_string()))?;
            return Ok(AccessToken::new(body.token));
        }

        let error: ErrorResponse = response.json().await.unwrap_or_default();
        Err(match error.error {
            Some(message) => AuthError::InvalidCredentials { message },
            None => AuthError::invalid_credentials(),
        })
    }

    /// Creates a new admin account.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        log::debug!("POST /users/register as {}", username);
        let response = self
            .http_client
            .post(self.url("/users/register"))
            .json(&Credentials { username, password })
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::CREATED {
            return Ok(());
        }

        let error: ErrorResponse = response.json().await.unwrap_or_default();
        Err(AuthError::RegistrationFailed {
            message: error
                .into_message()
                .unwrap_or_else(|| "Error registering user".to_string()),
        })
    }
}
