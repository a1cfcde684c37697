use common::Now;
use tracing::instrument;

use crate::{
    error::Error,
    handler::Handler,
    token::{TokenResponse, issue_token_response},
    upstream::UpstreamClient,
};

impl<U, N> Handler<U, N>
where
    U: UpstreamClient,
    N: Now,
{
    /// Exchanges an authorization code at LinkedIn and attaches a signed ID
    /// token issued by `https://{host}`.
    ///
    /// # Errors
    /// - the code exchange fails
    /// - signing the ID token fails
    #[instrument(skip_all, fields(host = %host), err)]
    pub async fn get_tokens(
        &self,
        code: &str,
        state: Option<&str>,
        host: &str,
    ) -> Result<TokenResponse, Error> {
        let token = self.upstream.exchange_code(code, state).await?;

        let response = issue_token_response(token, &self.keys, host, &self.client_id, N::now())?;

        Ok(response)
    }
}
