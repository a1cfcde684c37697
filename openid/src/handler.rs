//! # OpenID Connect on top of LinkedIn
//! - `/authorize` redirects the browser to the LinkedIn login
//! - `/token` exchanges the code at LinkedIn and adds a signed ID token
//! - `/userinfo` maps the LinkedIn profile and primary email onto OIDC claims
//! - `/.well-known/*` publishes the signing key and the provider metadata
//!
//! Each operation lives in its own module as an `impl Handler` block.
use std::{marker::PhantomData, sync::Arc};

use common::SystemNow;

use crate::keys::SigningKeyPair;

/// Entry point of the five OpenID operations.
///
/// Holds no per-request state; every call reads the immutable key pair and
/// configuration only.
pub struct Handler<U, N = SystemNow> {
    pub upstream: U,
    pub keys: Arc<SigningKeyPair>,
    /// Client id registered with LinkedIn, the `aud` of issued ID tokens.
    pub client_id: String,
    pub(crate) _now: PhantomData<N>,
}

impl<U> Handler<U, SystemNow> {
    pub fn new(upstream: U, keys: Arc<SigningKeyPair>, client_id: String) -> Self {
        Self {
            upstream,
            keys,
            client_id,
            _now: PhantomData,
        }
    }
}
