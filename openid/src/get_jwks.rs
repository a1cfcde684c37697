use common::Now;

use crate::{discovery::Jwks, handler::Handler, upstream::UpstreamClient};

impl<U, N> Handler<U, N>
where
    U: UpstreamClient,
    N: Now,
{
    /// Returns the key set with the public counterpart of the signing key.
    pub fn get_jwks(&self) -> Jwks {
        Jwks::new(self.keys.public_jwk())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
    use serde_json::{Map, Value};

    use crate::{fixture::fixture_handler, keys::KEY_ID, upstream::MockUpstreamClient};

    #[test]
    fn test_get_jwks() {
        // given
        let handler = fixture_handler(MockUpstreamClient::default());

        // when
        let got = handler.get_jwks();

        // then
        assert_eq!(got.keys.len(), 1);
        assert_eq!(got.keys[0].alg, "RS256");
        assert_eq!(got.keys[0].kid, KEY_ID);
    }

    #[test]
    fn test_get_jwks_verifies_issued_tokens() {
        // given
        let handler = fixture_handler(MockUpstreamClient::default());
        let token = handler
            .keys
            .sign(Map::new(), "auth.example.com", "client-id", Utc::now())
            .unwrap();

        // when
        let got = handler.get_jwks();

        // then
        let kid = decode_header(&token).unwrap().kid.unwrap();
        let jwk = got.keys.iter().find(|key| key.kid == kid).unwrap();
        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e).unwrap();
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["client-id"]);
        assert!(decode::<Map<String, Value>>(&token, &key, &validation).is_ok());
    }
}
