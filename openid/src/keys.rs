//! RSA key material used to sign ID tokens.
//!
//! The key pair is loaded once at startup from two PEM files and never
//! changes afterwards. Only the public half ever leaves this module, as a JWK.
use std::path::{Path, PathBuf};

use base64::{Engine as _, prelude::BASE64_URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs1::{DecodeRsaPrivateKey as _, DecodeRsaPublicKey as _},
    pkcs8::{DecodePrivateKey as _, DecodePublicKey as _},
    traits::PublicKeyParts as _,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifier of the one and only signing key.
pub const KEY_ID: &str = "jwtRS256";

/// Validity window of issued ID tokens.
pub const ID_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// A JSON Web Key describing the public signing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(rename = "use")]
    pub key_use: String,
    pub alg: String,
    pub kid: String,
    /// RSA modulus, base64url without padding.
    pub n: String,
    /// RSA public exponent, base64url without padding.
    pub e: String,
}

/// Claims as they are signed: the registered claims plus whatever the
/// caller adds. Callers must not pass registered claim names themselves.
#[derive(Debug, Serialize)]
struct SignedClaims<'a, C> {
    iss: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
    #[serde(flatten)]
    claims: C,
}

/// Matched RSA key pair for RS256 signing.
#[derive(Clone)]
pub struct SigningKeyPair {
    encoding: EncodingKey,
    public_key: RsaPublicKey,
}

impl SigningKeyPair {
    /// Loads the key pair from a private and a public PEM file.
    ///
    /// # Errors
    /// - a file cannot be read
    /// - a key cannot be parsed
    /// - the public key is not the counterpart of the private key
    pub fn from_pem_files(private_path: &Path, public_path: &Path) -> Result<Self, KeyError> {
        let read = |path: &Path| {
            std::fs::read(path).map_err(|source| KeyError::Read {
                path: path.to_path_buf(),
                source,
            })
        };

        Self::from_pem(&read(private_path)?, &read(public_path)?)
    }

    /// Loads the key pair from PEM encoded keys.
    ///
    /// The private key may be PKCS#8 or PKCS#1, the public key SPKI or PKCS#1.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyError> {
        let private_text = std::str::from_utf8(private_pem)
            .map_err(|err| KeyError::InvalidPrivateKey(err.to_string()))?;
        let public_text = std::str::from_utf8(public_pem)
            .map_err(|err| KeyError::InvalidPublicKey(err.to_string()))?;

        let private_key = RsaPrivateKey::from_pkcs8_pem(private_text)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(private_text))
            .map_err(|err| KeyError::InvalidPrivateKey(err.to_string()))?;
        let public_key = RsaPublicKey::from_public_key_pem(public_text)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(public_text))
            .map_err(|err| KeyError::InvalidPublicKey(err.to_string()))?;

        if private_key.to_public_key() != public_key {
            return Err(KeyError::Mismatch);
        }

        let encoding = EncodingKey::from_rsa_pem(private_pem)?;

        Ok(Self {
            encoding,
            public_key,
        })
    }

    /// Returns the public key as a JWK.
    #[must_use]
    pub fn public_jwk(&self) -> Jwk {
        Jwk {
            kty: "RSA".to_string(),
            key_use: "sig".to_string(),
            alg: "RS256".to_string(),
            kid: KEY_ID.to_string(),
            n: BASE64_URL_SAFE_NO_PAD.encode(self.public_key.n().to_bytes_be()),
            e: BASE64_URL_SAFE_NO_PAD.encode(self.public_key.e().to_bytes_be()),
        }
    }

    /// Signs `claims` as an RS256 JWT.
    ///
    /// Adds `iss = https://{issuer_host}`, `aud = audience`, `iat` and an
    /// `exp` one hour after `issued_at`. The full payload is logged at debug
    /// level.
    pub fn sign<C>(
        &self,
        claims: C,
        issuer_host: &str,
        audience: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, KeyError>
    where
        C: Serialize + std::fmt::Debug,
    {
        let iat = issued_at.timestamp();
        let payload = SignedClaims {
            iss: format!("https://{issuer_host}"),
            aud: audience,
            iat,
            exp: iat + ID_TOKEN_TTL_SECONDS,
            claims,
        };
        debug!(?payload, "signing payload");

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(KEY_ID.to_string());

        Ok(encode(&header, &payload, &self.encoding)?)
    }
}

/// Key material errors. Fatal when raised while loading at startup.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum KeyError {
    #[error("failed to read key file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("public key does not belong to the private key")]
    Mismatch,

    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
