use async_trait::async_trait;
use oauth::OAuth;
use reqwest::Client;
use tracing::debug;

use super::{RawEmailList, RawProfile, UpstreamClient, UpstreamToken};
use crate::config::Config;

const AUTHORIZE_PATH: &str = "/oauth/v2/authorization";
const TOKEN_PATH: &str = "/oauth/v2/accessToken";
const PROFILE_PATH: &str = "/v2/me?projection=(id,localizedLastName,localizedFirstName,profilePicture(displayImage~:playableStreams))";
const EMAILS_PATH: &str =
    "/v2/clientAwareMemberHandles?q=members&projection=(elements*(primary,type,handle~))";

/// `openid` is handled by this service and unknown to LinkedIn.
const OPENID_SCOPE: &str = "openid";

/// [`UpstreamClient`] for the LinkedIn v2 API.
#[derive(Debug, Clone)]
pub struct LinkedinClient {
    oauth: OAuth,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
    api_url: String,
    login_url: String,
}

impl LinkedinClient {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Creates a client on top of an existing HTTP client.
    #[must_use]
    pub fn with_client(config: &Config, client: Client) -> Self {
        Self {
            oauth: OAuth::new(client),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
            api_url: config.api_url.clone(),
            login_url: config.login_url.clone(),
        }
    }
}

#[async_trait]
impl UpstreamClient for LinkedinClient {
    fn authorize_url(
        &self,
        client_id: &str,
        scope: &str,
        state: &str,
        response_type: &str,
    ) -> Result<String, oauth::Error> {
        let scopes: Vec<&str> = scope
            .split_whitespace()
            .filter(|scope| *scope != OPENID_SCOPE)
            .collect();

        OAuth::generate_authorization_url(
            &format!("{}{AUTHORIZE_PATH}", self.login_url),
            client_id,
            &scopes,
            state,
            response_type,
            &self.redirect_uri,
        )
    }

    async fn exchange_code(
        &self,
        code: &str,
        state: Option<&str>,
    ) -> Result<UpstreamToken, oauth::Error> {
        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
        ];
        if let Some(state) = state.filter(|state| !state.is_empty()) {
            params.push(("state", state));
        }

        let token: UpstreamToken = self
            .oauth
            .validate_authorization_code(&format!("{}{TOKEN_PATH}", self.api_url), &params)
            .await?;
        debug!(
            expires_in = ?token.expires_in,
            has_scope = token.scope.is_some(),
            "received upstream token"
        );

        Ok(token.with_defaults(&self.scope))
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<RawProfile, oauth::Error> {
        self.oauth
            .get_with_bearer(&format!("{}{PROFILE_PATH}", self.api_url), access_token)
            .await
    }

    async fn fetch_emails(&self, access_token: &str) -> Result<RawEmailList, oauth::Error> {
        self.oauth
            .get_with_bearer(&format!("{}{EMAILS_PATH}", self.api_url), access_token)
            .await
    }
}
