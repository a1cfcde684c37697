use common::Now;
use tracing::instrument;

use crate::{error::Error, handler::Handler, upstream::UpstreamClient};

impl<U, N> Handler<U, N>
where
    U: UpstreamClient,
    N: Now,
{
    /// Builds the LinkedIn login URL the browser is redirected to.
    ///
    /// # Errors
    /// - the configured login URL is invalid
    #[instrument(skip_all, fields(client_id = %client_id, response_type = %response_type), err)]
    pub fn get_authorize_url(
        &self,
        client_id: &str,
        scope: &str,
        state: &str,
        response_type: &str,
    ) -> Result<String, Error> {
        Ok(self
            .upstream
            .authorize_url(client_id, scope, state, response_type)?)
    }
}
