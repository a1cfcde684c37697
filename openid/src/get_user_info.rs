use common::Now;
use tracing::instrument;

use crate::{
    claims::{UserInfo, normalize_emails, normalize_profile},
    error::Error,
    handler::Handler,
    upstream::UpstreamClient,
};

impl<U, N> Handler<U, N>
where
    U: UpstreamClient,
    N: Now,
{
    /// Resolves the OIDC claims of the member owning `access_token`.
    ///
    /// Profile and email addresses are fetched concurrently and mapped once
    /// both arrived. Either failure fails the whole call.
    ///
    /// # Errors
    /// - an upstream request fails
    /// - the member has no primary email address
    #[instrument(skip_all, err)]
    pub async fn get_user_info(&self, access_token: &str) -> Result<UserInfo, Error> {
        let (profile, emails) = tokio::try_join!(
            self.upstream.fetch_profile(access_token),
            self.upstream.fetch_emails(access_token),
        )?;

        let profile = normalize_profile(profile);
        let email = normalize_emails(emails)?;

        Ok(UserInfo::new(profile, email))
    }
}
