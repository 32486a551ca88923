//! Main AdminClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::auth::LoginFlow;
use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;
use crate::retry::RetryConfig;

/// The client for the site content backend.
///
/// Cheap to clone (uses `Arc` internally) and safe to share across tasks.
///
/// # Example
///
/// ```ignore
/// use siteadmin_lib::{AdminClient, Resource, auth::StaticTokenProvider};
///
/// let client = AdminClient::builder()
///     .url("https://api.example.com")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build()?;
///
/// let awards = client.list(Resource::Awards).await?;
/// ```
#[derive(Clone)]
pub struct AdminClient {
    pub(crate) inner: Arc<AdminClientInner>,
}

pub(crate) struct AdminClientInner {
    pub(crate) base_url: String,
    pub(crate) token_provider: Arc<dyn TokenProvider>,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
    pub(crate) retry_config: RetryConfig,
}

impl AdminClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> AdminClientBuilder<Missing, Missing> {
        AdminClientBuilder::new()
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry_config
    }

    /// Returns a login flow sharing this client's HTTP connection pool.
    pub fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(self.inner.base_url.clone()).with_http_client(self.inner.http_client.clone())
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .field("retry_config", &self.inner.retry_config)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`AdminClient`].
///
/// Uses the typestate pattern so `build` is only reachable once the
/// required fields are set.
///
/// # Required Fields
///
/// - `url` - The backend base URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct AdminClientBuilder<Url, Provider> {
    url: Url,
    token_provider: Provider,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_config: RetryConfig,
    http_client: Option<Client>,
}

impl AdminClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            retry_config: RetryConfig::default(),
            http_client: None,
        }
    }
}

impl Default for AdminClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> AdminClientBuilder<Missing, P> {
    /// Sets the backend base URL.
    pub fn url(self, url: impl Into<String>) -> AdminClientBuilder<Set<String>, P> {
        AdminClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            http_client: self.http_client,
        }
    }
}

impl<U> AdminClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> AdminClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        AdminClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            http_client: self.http_client,
        }
    }
}

impl<U, P> AdminClientBuilder<U, P> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// Ignored when a custom HTTP client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the retry policy.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl AdminClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`AdminClient`].
    ///
    /// Fails when the URL is not an absolute http(s) URL or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<AdminClient, Error> {
        let base_url = normalize_base_url(&self.url.0)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(AdminClient {
            inner: Arc::new(AdminClientInner {
                base_url,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            raw,
            parsed.scheme()
        )));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    #[test]
    fn test_build_trims_trailing_slash() {
        let client = AdminClient::builder()
            .url("http://localhost:5000/api/")
            .token_provider(StaticTokenProvider::new("t"))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_build_rejects_invalid_url() {
        let result = AdminClient::builder()
            .url("not a url")
            .token_provider(StaticTokenProvider::new("t"))
            .build();
        assert!(matches!(result, Err(Error::Api(ApiError::InvalidUrl(_)))));

        let result = AdminClient::builder()
            .url("ftp://example.com")
            .token_provider(StaticTokenProvider::new("t"))
            .build();
        assert!(matches!(result, Err(Error::Api(ApiError::InvalidUrl(_)))));
    }

    #[test]
    fn test_retry_config_is_kept() {
        let client = AdminClient::builder()
            .url("https://api.example.com")
            .token_provider(StaticTokenProvider::new("t"))
            .retry(RetryConfig::no_retry())
            .build()
            .unwrap();
        assert_eq!(client.retry_config().max_retries, 0);
    }
}
