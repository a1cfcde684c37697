//! Documents published under `/.well-known`.
use serde::{Deserialize, Serialize};

use crate::keys::Jwk;

/// JSON Web Key Set with the one signing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    #[must_use]
    pub fn new(key: Jwk) -> Self {
        Self { keys: vec![key] }
    }
}

/// OpenID Provider metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub token_endpoint_auth_methods_supported: Vec<String>,
    pub token_endpoint_auth_signing_alg_values_supported: Vec<String>,
    pub userinfo_endpoint: String,
    pub jwks_uri: String,
    pub scopes_supported: Vec<String>,
    pub response_types_supported: Vec<String>,
    pub subject_types_supported: Vec<String>,
    pub userinfo_signing_alg_values_supported: Vec<String>,
    pub id_token_signing_alg_values_supported: Vec<String>,
    pub request_object_signing_alg_values_supported: Vec<String>,
    pub display_values_supported: Vec<String>,
    pub claims_supported: Vec<String>,
}

impl DiscoveryDocument {
    /// Builds the metadata for the issuer `https://{host}`.
    #[must_use]
    pub fn for_host(host: &str) -> Self {
        let issuer = format!("https://{host}");

        Self {
            authorization_endpoint: format!("{issuer}/authorize"),
            token_endpoint: format!("{issuer}/token"),
            token_endpoint_auth_methods_supported: strings(&[
                "client_secret_basic",
                "private_key_jwt",
            ]),
            token_endpoint_auth_signing_alg_values_supported: strings(&["RS256"]),
            userinfo_endpoint: format!("{issuer}/userinfo"),
            jwks_uri: format!("{issuer}/.well-known/jwks.json"),
            scopes_supported: strings(&["openid", "read:user", "user:email"]),
            response_types_supported: strings(&["code", "code id_token", "id_token", "token id_token"]),
            subject_types_supported: strings(&["public"]),
            userinfo_signing_alg_values_supported: strings(&["none"]),
            id_token_signing_alg_values_supported: strings(&["RS256"]),
            request_object_signing_alg_values_supported: strings(&["none"]),
            display_values_supported: strings(&["page", "popup"]),
            claims_supported: strings(&[
                "sub",
                "firstName",
                "lastName",
                "picture",
                "email",
                "email_verified",
            ]),
            issuer,
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
