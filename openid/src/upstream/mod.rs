//! Access to the upstream OAuth2 provider.
use async_trait::async_trait;

pub mod linkedin;
mod models;

pub use linkedin::LinkedinClient;
pub use models::{MemberId, RawEmailElement, RawEmailHandle, RawEmailList, RawProfile, UpstreamToken};

/// Client for the upstream provider.
///
/// [`LinkedinClient`] talks to the real API, tests use the generated
/// `MockUpstreamClient`.
#[cfg_attr(test, mock::client)]
#[async_trait]
pub trait UpstreamClient: Send + Sync + 'static {
    /// Builds the URL the browser is sent to for login. Does no I/O.
    fn authorize_url(
        &self,
        client_id: &str,
        scope: &str,
        state: &str,
        response_type: &str,
    ) -> Result<String, oauth::Error>;

    /// Exchanges an authorization code for an access token.
    async fn exchange_code(
        &self,
        code: &str,
        state: Option<&str>,
    ) -> Result<UpstreamToken, oauth::Error>;

    async fn fetch_profile(&self, access_token: &str) -> Result<RawProfile, oauth::Error>;

    async fn fetch_emails(&self, access_token: &str) -> Result<RawEmailList, oauth::Error>;
}
