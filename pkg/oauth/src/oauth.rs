use reqwest::{
    Client, RequestBuilder, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Generic OAuth 2.0 helper that abstracts authorization URL creation, the
/// authorization code exchange and authenticated resource requests.
///
/// Every upstream response is funnelled through [`check_response`], so all
/// calls share the same failure detection.
#[derive(Debug, Default, Clone)]
pub struct OAuth {
    client: Client,
}

impl OAuth {
    /// Creates a new `OAuth` helper on top of the given HTTP client.
    #[inline]
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Constructs the OAuth 2.0 authorization URL.
    ///
    /// All parameters are URL-encoded. Scopes are joined by a single space and
    /// the `scope` parameter is left out when there are none.
    pub fn generate_authorization_url(
        auth_endpoint: &str,
        client_id: &str,
        scopes: &[&str],
        state: &str,
        response_type: &str,
        redirect_uri: &str,
    ) -> Result<String, Error> {
        let scopes = scopes.join(" ");

        let mut params = vec![("client_id", client_id)];
        if !scopes.is_empty() {
            params.push(("scope", scopes.as_str()));
        }
        params.push(("state", state));
        params.push(("response_type", response_type));
        params.push(("redirect_uri", redirect_uri));

        let url = Url::parse_with_params(auth_endpoint, &params)?;
        Ok(url.into())
    }

    /// Exchanges an authorization code for a token response.
    ///
    /// The parameters are sent form-encoded in the request body, which is
    /// where most providers expect the client credentials as well.
    pub async fn validate_authorization_code<T: DeserializeOwned>(
        &self,
        token_endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        let body = serde_urlencoded::to_string(params)?;

        debug!(
            token_endpoint,
            fields = ?params.iter().map(|(key, _)| *key).collect::<Vec<_>>(),
            "exchanging authorization code"
        );

        let request = self
            .client
            .post(token_endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json")
            .body(body);

        Self::send(request).await
    }

    /// Fetches a protected resource on behalf of the user.
    ///
    /// The endpoint is used verbatim, including any query it carries.
    pub async fn get_with_bearer<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        access_token: &str,
    ) -> Result<T, Error> {
        debug!(endpoint, "fetching upstream resource");

        let request = self
            .client
            .get(endpoint)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(ACCEPT, "application/json");

        Self::send(request).await
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, Error> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        check_response(status, &body)
    }
}

/// Validates an upstream response.
///
/// - A JSON body carrying an `error` key is a failure, whatever the status.
/// - Otherwise the status must be `200 OK` and the body must decode into `T`.
/// - Anything else fails with the status code and its reason phrase.
pub fn check_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, Error> {
    debug!(%status, body = %String::from_utf8_lossy(body), "checking upstream response");

    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(err) if status == StatusCode::OK => return Err(Error::DecodeBody(err)),
        Err(_) => return Err(Error::UnexpectedStatus(status)),
    };

    if let Some(error) = value.get("error").filter(|error| !error.is_null()) {
        return Err(Error::ErrorResponse {
            error: as_text(error),
            error_description: value
                .get("error_description")
                .filter(|description| !description.is_null())
                .map(as_text),
        });
    }

    if status != StatusCode::OK {
        return Err(Error::UnexpectedStatus(status));
    }

    Ok(serde_json::from_value(value)?)
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Token {
        access_token: String,
    }

    #[rstest]
    #[case::ok(StatusCode::OK)]
    #[case::bad_request(StatusCode::BAD_REQUEST)]
    #[case::unauthorized(StatusCode::UNAUTHORIZED)]
    fn test_check_response_error_body_wins_over_status(#[case] status: StatusCode) {
        let body = br#"{"error":"invalid_grant","error_description":"code expired"}"#;

        let got = check_response::<Token>(status, body);

        match got {
            Err(Error::ErrorResponse {
                error,
                error_description,
            }) => {
                assert_eq!(error, "invalid_grant");
                assert_eq!(error_description.as_deref(), Some("code expired"));
            }
            other => panic!("expected error response, got {other:?}"),
        }
    }

    #[test]
    fn test_check_response_error_without_description() {
        let got = check_response::<Token>(StatusCode::OK, br#"{"error":"server_error"}"#);

        assert!(matches!(
            got,
            Err(Error::ErrorResponse { ref error, error_description: None }) if error == "server_error"
        ));
    }

    #[test]
    fn test_check_response_ok() {
        let got = check_response::<Token>(StatusCode::OK, br#"{"access_token":"abc"}"#);

        assert_eq!(
            got.unwrap(),
            Token {
                access_token: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_check_response_null_error_is_ignored() {
        let got = check_response::<Token>(StatusCode::OK, br#"{"error":null,"access_token":"abc"}"#);

        assert!(got.is_ok());
    }

    #[rstest]
    #[case::json_body(StatusCode::INTERNAL_SERVER_ERROR, br#"{"message":"boom"}"#.as_slice())]
    #[case::html_body(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>".as_slice())]
    #[case::empty_body(StatusCode::CREATED, b"".as_slice())]
    fn test_check_response_unexpected_status(#[case] status: StatusCode, #[case] body: &[u8]) {
        let got = check_response::<Token>(status, body);

        match got {
            Err(err @ Error::UnexpectedStatus(got_status)) => {
                assert_eq!(got_status, status);
                assert!(err.to_string().contains(&status.as_u16().to_string()));
            }
            other => panic!("expected unexpected status, got {other:?}"),
        }
    }

    #[rstest]
    #[case::not_json(b"not json".as_slice())]
    #[case::wrong_shape(br#"{"token":"abc"}"#.as_slice())]
    fn test_check_response_decode_error(#[case] body: &[u8]) {
        let got = check_response::<Token>(StatusCode::OK, body);

        assert!(matches!(got, Err(Error::DecodeBody(_))));
    }

    #[test]
    fn test_generate_authorization_url() {
        let got = OAuth::generate_authorization_url(
            "https://login.example.com/oauth/v2/authorization",
            "client id",
            &["r_liteprofile", "r_emailaddress"],
            "st&te",
            "code",
            "https://app.example.com/callback",
        )
        .unwrap();

        let url = Url::parse(&got).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(url.path(), "/oauth/v2/authorization");
        assert_eq!(
            pairs,
            vec![
                ("client_id".into(), "client id".into()),
                ("scope".into(), "r_liteprofile r_emailaddress".into()),
                ("state".into(), "st&te".into()),
                ("response_type".into(), "code".into()),
                ("redirect_uri".into(), "https://app.example.com/callback".into()),
            ]
        );
    }

    #[test]
    fn test_generate_authorization_url_without_scopes() {
        let got = OAuth::generate_authorization_url(
            "https://login.example.com/authorize",
            "client",
            &[],
            "state",
            "code",
            "https://app.example.com/callback",
        )
        .unwrap();

        let url = Url::parse(&got).unwrap();
        assert!(url.query_pairs().all(|(key, _)| key != "scope"));
    }

    #[test]
    fn test_generate_authorization_url_invalid_endpoint() {
        let got = OAuth::generate_authorization_url("not a url", "c", &[], "s", "code", "r");

        assert!(matches!(got, Err(Error::ParseURL(_))));
    }
}
