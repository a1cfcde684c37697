use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Token response of the LinkedIn token endpoint.
///
/// Fields this service does not know about are kept in [`UpstreamToken::extra`]
/// and passed on untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UpstreamToken {
    /// Fills in what LinkedIn leaves out of its token responses.
    ///
    /// `token_type` is always `bearer`. `scope` is always the configured,
    /// space separated scope: LinkedIn either omits it or echoes a comma
    /// separated list relying parties do not understand.
    #[must_use]
    pub fn with_defaults(mut self, scope: &str) -> Self {
        self.token_type = Some("bearer".to_string());
        self.scope = Some(scope.to_string());
        self
    }
}

/// Member id as returned by `/v2/me`. LinkedIn has used both numbers and
/// strings here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MemberId {
    Number(Number),
    Text(String),
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Lite profile of the authenticated member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    pub id: MemberId,
    #[serde(default)]
    pub localized_first_name: Option<String>,
    #[serde(default)]
    pub localized_last_name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<Value>,
}

/// Contact handles of the authenticated member.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEmailList {
    #[serde(default)]
    pub elements: Vec<RawEmailElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEmailElement {
    #[serde(default)]
    pub primary: bool,
    /// `EMAIL` or `PHONE`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "handle~", default)]
    pub handle: Option<RawEmailHandle>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEmailHandle {
    #[serde(default)]
    pub email_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_upstream_token_keeps_unknown_fields() {
        let token: UpstreamToken = serde_json::from_value(json!({
            "access_token": "AQX",
            "expires_in": 5184000,
            "refresh_token": "AQT",
            "refresh_token_expires_in": 525600
        }))
        .unwrap();

        let got = serde_json::to_value(token.with_defaults("r_liteprofile")).unwrap();

        assert_eq!(
            got,
            json!({
                "access_token": "AQX",
                "token_type": "bearer",
                "scope": "r_liteprofile",
                "expires_in": 5184000,
                "refresh_token": "AQT",
                "refresh_token_expires_in": 525600
            })
        );
    }

    #[rstest]
    #[case::comma_separated_scope_replaced(Some("r_emailaddress,r_liteprofile"))]
    #[case::missing_scope_filled(None)]
    fn test_upstream_token_with_defaults(#[case] scope: Option<&str>) {
        let token = UpstreamToken {
            access_token: "AQX".to_string(),
            token_type: Some("Bearer".to_string()),
            scope: scope.map(str::to_string),
            ..Default::default()
        };

        let got = token.with_defaults("openid r_liteprofile");

        assert_eq!(got.token_type.as_deref(), Some("bearer"));
        assert_eq!(got.scope.as_deref(), Some("openid r_liteprofile"));
    }

    #[test]
    fn test_upstream_token_keeps_field_order() {
        let token: UpstreamToken =
            serde_json::from_str(r#"{"access_token":"a","zeta":1,"alpha":2}"#).unwrap();

        let got = serde_json::to_string(&token).unwrap();

        assert_eq!(got, r#"{"access_token":"a","zeta":1,"alpha":2}"#);
    }

    #[rstest]
    #[case::number(json!(12345), "12345")]
    #[case::text(json!("abc-DEF"), "abc-DEF")]
    fn test_member_id_display(#[case] id: Value, #[case] want: &str) {
        let got: MemberId = serde_json::from_value(id).unwrap();

        assert_eq!(got.to_string(), want);
    }

    #[test]
    fn test_raw_email_list_parses_linkedin_shape() {
        let got: RawEmailList = serde_json::from_value(json!({
            "elements": [
                { "handle": "urn:li:emailAddress:1", "type": "EMAIL", "primary": true,
                  "handle~": { "emailAddress": "ann@example.com" } },
                { "handle": "urn:li:phoneNumber:2", "type": "PHONE", "primary": true,
                  "handle~": { "phoneNumber": { "number": "123" } } }
            ]
        }))
        .unwrap();

        assert_eq!(got.elements.len(), 2);
        assert_eq!(
            got.elements[0]
                .handle
                .as_ref()
                .and_then(|handle| handle.email_address.as_deref()),
            Some("ann@example.com")
        );
        assert_eq!(got.elements[1].kind.as_deref(), Some("PHONE"));
        assert_eq!(got.elements[1].handle, Some(RawEmailHandle::default()));
    }
}
