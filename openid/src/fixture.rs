#![cfg(test)]

use std::{marker::PhantomData, sync::Arc};

use common::mock::MockNow;
use reqwest::StatusCode;
use serde_json::json;
use testutils::{PRIVATE_KEY_PEM, PUBLIC_KEY_PEM};

use crate::{
    config::Config,
    handler::Handler,
    keys::SigningKeyPair,
    upstream::{MemberId, RawEmailElement, RawEmailHandle, RawEmailList, RawProfile, UpstreamToken},
};

pub(crate) fn fixture_config() -> Config {
    Config {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        redirect_uri: "https://pool.auth.example.com/oauth2/idpresponse".to_string(),
        api_url: "https://api.linkedin.example".to_string(),
        login_url: "https://www.linkedin.example".to_string(),
        scope: "openid r_liteprofile r_emailaddress".to_string(),
        port: 3000,
        private_key_path: "jwtRS256.key".into(),
        public_key_path: "jwtRS256.key.pub".into(),
        otlp_endpoint: None,
    }
}

pub(crate) fn fixture_keys() -> SigningKeyPair {
    SigningKeyPair::from_pem(PRIVATE_KEY_PEM.as_bytes(), PUBLIC_KEY_PEM.as_bytes()).unwrap()
}

pub(crate) fn fixture_handler<U>(upstream: U) -> Handler<U, MockNow> {
    Handler {
        upstream,
        keys: Arc::new(fixture_keys()),
        client_id: "client-id".to_string(),
        _now: PhantomData,
    }
}

pub(crate) fn fixture_oauth_error() -> oauth::Error {
    oauth::Error::UnexpectedStatus(StatusCode::INTERNAL_SERVER_ERROR)
}

pub(crate) fn fixture_upstream_token() -> UpstreamToken {
    UpstreamToken {
        access_token: "access-token".to_string(),
        token_type: Some("bearer".to_string()),
        scope: Some("openid r_liteprofile r_emailaddress".to_string()),
        expires_in: Some(5_184_000),
        ..Default::default()
    }
}

pub(crate) fn fixture_profile() -> RawProfile {
    RawProfile {
        id: MemberId::Number(12345.into()),
        localized_first_name: Some("Ann".to_string()),
        localized_last_name: Some("Lee".to_string()),
        profile_picture: Some(json!({ "displayImage": "urn:li:digitalmediaAsset:C4" })),
    }
}

pub(crate) fn fixture_email_list() -> RawEmailList {
    RawEmailList {
        elements: vec![
            RawEmailElement {
                primary: true,
                kind: Some("PHONE".to_string()),
                handle: Some(RawEmailHandle::default()),
            },
            RawEmailElement {
                primary: true,
                kind: Some("EMAIL".to_string()),
                handle: Some(RawEmailHandle {
                    email_address: Some("ann@example.com".to_string()),
                }),
            },
        ],
    }
}
