use reqwest::StatusCode;

/// OAuth errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to build request body")]
    BuildRequestBody(#[from] serde_urlencoded::ser::Error),

    #[error("failed to send request: {0}")]
    SendRequest(#[from] reqwest::Error),

    /// The provider answered with an OAuth error body (`{"error": ...}`).
    #[error(
        "upstream responded with a failure: {error}, {}",
        .error_description.as_deref().unwrap_or("no description")
    )]
    ErrorResponse {
        error: String,
        error_description: Option<String>,
    },

    #[error("upstream responded with a failure: {0}")]
    UnexpectedStatus(StatusCode),

    #[error("failed to decode response body: {0}")]
    DecodeBody(#[from] serde_json::Error),

    #[error("parse URL: {0}")]
    ParseURL(#[from] url::ParseError),
}
