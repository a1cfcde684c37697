use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::keys::{KeyError, SigningKeyPair};
use crate::upstream::UpstreamToken;

/// Upstream token response extended by a signed ID token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(flatten)]
    pub token: UpstreamToken,
    pub id_token: String,
}

/// Signs a minimal ID token and attaches it to the upstream token response.
///
/// The ID token only carries the registered claims. User claims come from
/// the userinfo endpoint.
pub fn issue_token_response(
    mut token: UpstreamToken,
    keys: &SigningKeyPair,
    issuer_host: &str,
    audience: &str,
    issued_at: DateTime<Utc>,
) -> Result<TokenResponse, KeyError> {
    let id_token = keys.sign(Map::new(), issuer_host, audience, issued_at)?;
    token.extra.remove("id_token");

    Ok(TokenResponse { token, id_token })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::fixture_keys;
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
    use serde_json::{Value, json};

    #[test]
    fn test_issue_token_response() {
        let keys = fixture_keys();
        let token: UpstreamToken = serde_json::from_value(json!({
            "access_token": "AQX",
            "token_type": "bearer",
            "scope": "r_liteprofile",
            "expires_in": 5184000,
            "refresh_token": "AQT",
            "id_token": "upstream"
        }))
        .unwrap();
        let issued_at = DateTime::from_timestamp(1_600_000_000, 0).unwrap();

        let got = issue_token_response(token, &keys, "auth.example.com", "client-id", issued_at)
            .unwrap();

        let body = serde_json::to_value(&got).unwrap();
        assert_eq!(body["access_token"], "AQX");
        assert_eq!(body["refresh_token"], "AQT");
        assert_eq!(body["expires_in"], 5184000);
        assert_ne!(body["id_token"], "upstream");

        let jwk = keys.public_jwk();
        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e).unwrap();
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["client-id"]);
        validation.validate_exp = false;
        let claims = decode::<Value>(&got.id_token, &key, &validation)
            .unwrap()
            .claims;
        assert_eq!(
            claims,
            json!({
                "iss": "https://auth.example.com",
                "aud": "client-id",
                "iat": 1_600_000_000,
                "exp": 1_600_003_600
            })
        );
    }
}
