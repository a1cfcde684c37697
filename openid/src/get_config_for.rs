use common::Now;

use crate::{discovery::DiscoveryDocument, handler::Handler, upstream::UpstreamClient};

impl<U, N> Handler<U, N>
where
    U: UpstreamClient,
    N: Now,
{
    /// Returns the provider metadata as seen from `host`.
    pub fn get_config_for(&self, host: &str) -> DiscoveryDocument {
        DiscoveryDocument::for_host(host)
    }
}
