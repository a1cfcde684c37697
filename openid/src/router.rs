//! HTTP surface of the OpenID operations.
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    body::Body,
    extract::{Query, State},
    http::{
        HeaderMap, StatusCode, Uri,
        header::{AUTHORIZATION, HOST, LOCATION, WWW_AUTHENTICATE},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use common::Now;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::{
    claims::UserInfo, discovery::DiscoveryDocument, discovery::Jwks, error::Error,
    handler::Handler, token::TokenResponse, upstream::UpstreamClient,
};

/// Builds the router of the five OpenID endpoints.
pub fn router<U, N>(handler: Arc<Handler<U, N>>) -> Router
where
    U: UpstreamClient,
    N: Now,
{
    Router::new()
        .route("/authorize", get(authorize::<U, N>))
        .route(
            "/token",
            get(token_from_query::<U, N>).post(token_from_form::<U, N>),
        )
        .route("/userinfo", get(userinfo::<U, N>).post(userinfo::<U, N>))
        .route("/.well-known/jwks.json", get(jwks::<U, N>))
        .route(
            "/.well-known/openid-configuration",
            get(openid_configuration::<U, N>),
        )
        .with_state(handler)
}

#[derive(Debug, Deserialize)]
struct AuthorizeParams {
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    scope: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    response_type: String,
}

#[derive(Debug, Deserialize)]
struct TokenParams {
    code: Option<String>,
    state: Option<String>,
}

/// Redirects the browser to the LinkedIn login.
#[instrument(skip_all, err)]
async fn authorize<U: UpstreamClient, N: Now>(
    State(handler): State<Arc<Handler<U, N>>>,
    Query(params): Query<AuthorizeParams>,
) -> Result<Response, ApiError> {
    let url = handler.get_authorize_url(
        &params.client_id,
        &params.scope,
        &params.state,
        &params.response_type,
    )?;

    let response = Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, url)
        .body(Body::empty())?;

    Ok(response)
}

async fn token_from_query<U: UpstreamClient, N: Now>(
    State(handler): State<Arc<Handler<U, N>>>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<TokenParams>,
) -> Result<Json<TokenResponse>, ApiError> {
    token(&handler, host(&headers, &uri)?, params).await
}

async fn token_from_form<U: UpstreamClient, N: Now>(
    State(handler): State<Arc<Handler<U, N>>>,
    headers: HeaderMap,
    uri: Uri,
    Form(params): Form<TokenParams>,
) -> Result<Json<TokenResponse>, ApiError> {
    token(&handler, host(&headers, &uri)?, params).await
}

/// Exchanges the authorization code and issues the ID token.
#[instrument(skip_all, err)]
async fn token<U: UpstreamClient, N: Now>(
    handler: &Handler<U, N>,
    host: &str,
    params: TokenParams,
) -> Result<Json<TokenResponse>, ApiError> {
    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or(ApiError::MissingParameter("code"))?;

    let response = handler
        .get_tokens(&code, params.state.as_deref(), host)
        .await?;

    Ok(Json(response))
}

#[instrument(skip_all, err)]
async fn userinfo<U: UpstreamClient, N: Now>(
    State(handler): State<Arc<Handler<U, N>>>,
    headers: HeaderMap,
) -> Result<Json<UserInfo>, ApiError> {
    let access_token = bearer_token(&headers).ok_or(ApiError::MissingBearerToken)?;

    let user_info = handler.get_user_info(access_token).await?;

    Ok(Json(user_info))
}

async fn jwks<U: UpstreamClient, N: Now>(State(handler): State<Arc<Handler<U, N>>>) -> Json<Jwks> {
    Json(handler.get_jwks())
}

async fn openid_configuration<U: UpstreamClient, N: Now>(
    State(handler): State<Arc<Handler<U, N>>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<DiscoveryDocument>, ApiError> {
    Ok(Json(handler.get_config_for(host(&headers, &uri)?)))
}

/// Host the request was sent to. HTTP/2 requests carry it in the
/// `:authority` pseudo header, which ends up in the request URI.
fn host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> Result<&'a str, ApiError> {
    headers
        .get(HOST)
        .and_then(|host| host.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .filter(|host| !host.is_empty())
        .ok_or(ApiError::MissingParameter("host"))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Errors of the HTTP endpoints, rendered as OAuth error bodies.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error(transparent)]
    OpenId(#[from] Error),

    #[error("missing bearer token")]
    MissingBearerToken,

    #[error("missing {0}")]
    MissingParameter(&'static str),

    #[error("failed to build response: {0}")]
    BuildResponse(#[from] axum::http::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, description) = match self {
            Self::OpenId(Error::Upstream(oauth::Error::ErrorResponse {
                error,
                error_description,
            })) => (StatusCode::BAD_REQUEST, error, error_description),
            Self::OpenId(err @ Error::Upstream(_)) => (
                StatusCode::BAD_GATEWAY,
                "server_error".to_string(),
                Some(err.to_string()),
            ),
            Self::OpenId(Error::NoPrimaryEmail) => (
                StatusCode::BAD_REQUEST,
                "invalid_request".to_string(),
                Some(Error::NoPrimaryEmail.to_string()),
            ),
            err @ Self::MissingParameter(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_request".to_string(),
                Some(err.to_string()),
            ),
            Self::MissingBearerToken => {
                let body = json!({
                    "error": "invalid_token",
                    "error_description": Self::MissingBearerToken.to_string(),
                });
                return (
                    StatusCode::UNAUTHORIZED,
                    [(WWW_AUTHENTICATE, "Bearer")],
                    Json(body),
                )
                    .into_response();
            }
            internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "server_error".to_string(),
                Some(internal.to_string()),
            ),
        };

        let body = Json(json!({ "error": error, "error_description": description }));
        (status, body).into_response()
    }
}
