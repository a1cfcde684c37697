use crate::keys::KeyError;

/// Errors surfaced by the OpenID operations.
///
/// Translation into protocol responses happens in [`crate::router`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("LinkedIn API error: {0}")]
    Upstream(#[from] oauth::Error),

    #[error("user did not have a primary email address")]
    NoPrimaryEmail,

    #[error("failed to sign id token: {0}")]
    Sign(#[from] KeyError),
}
