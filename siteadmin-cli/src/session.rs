//! Backend URL and token resolution for commands.

use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
use siteadmin_lib::AdminClient;
use siteadmin_lib::auth::AccessToken;
use siteadmin_lib::auth::LoginFlow;
use siteadmin_lib::auth::StaticTokenProvider;
use siteadmin_lib::auth::TokenProvider;
use siteadmin_lib::error::AuthError;

use crate::settings::SettingsProvider;

/// Token provider that reads the token saved by `siteadmin login`.
///
/// The store is read on every request, so a login in another terminal
/// takes effect without restarting a browse session.
pub struct StoredTokenProvider {
    settings: SettingsProvider,
}

impl StoredTokenProvider {
    pub fn new(settings: SettingsProvider) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl TokenProvider for StoredTokenProvider {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        match self.settings.token().await {
            Ok(Some(token)) => Ok(AccessToken::new(token)),
            Ok(None) => Err(AuthError::MissingToken),
            Err(e) => {
                log::warn!("Failed to read stored token: {}", e);
                Err(AuthError::MissingToken)
            }
        }
    }
}

/// Settings plus the command-line overrides.
pub struct Session {
    settings: SettingsProvider,
    url: Option<String>,
    token: Option<String>,
}

impl Session {
    pub fn new(settings: SettingsProvider, url: Option<String>, token: Option<String>) -> Self {
        Self {
            settings,
            url,
            token,
        }
    }

    pub fn settings(&self) -> &SettingsProvider {
        &self.settings
    }

    /// `--url` wins over the stored `backend.url`.
    pub async fn base_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        self.settings
            .backend_url()
            .await?
            .context("No backend URL configured. Pass --url or run `siteadmin config --url <URL>`")
    }

    /// Builds a client for the resolved backend.
    ///
    /// `--token` is used as is; otherwise the stored token is read per request.
    pub async fn client(&self) -> Result<AdminClient> {
        let url = self.base_url().await?;
        let builder = AdminClient::builder().url(url);
        let builder = match &self.token {
            Some(token) => builder.token_provider(StaticTokenProvider::new(token.clone())),
            None => builder.token_provider(StoredTokenProvider::new(self.settings.clone())),
        };
        Ok(builder.build()?)
    }

    pub async fn login_flow(&self) -> Result<LoginFlow> {
        Ok(LoginFlow::new(self.base_url().await?))
    }
}
