//! Mapping of LinkedIn profile data onto OIDC user claims.
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::upstream::{RawEmailList, RawProfile};

const EMAIL_HANDLE_TYPE: &str = "EMAIL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// The upstream `profilePicture` object as JSON text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailClaims {
    pub email: String,
    pub email_verified: bool,
}

/// Claims returned from the userinfo endpoint.
///
/// Both parts serialize into one flat object. Their field names are disjoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(flatten)]
    pub profile: ProfileClaims,
    #[serde(flatten)]
    pub email: EmailClaims,
}

impl UserInfo {
    #[must_use]
    pub fn new(profile: ProfileClaims, email: EmailClaims) -> Self {
        Self { profile, email }
    }
}

#[must_use]
pub fn normalize_profile(profile: RawProfile) -> ProfileClaims {
    ProfileClaims {
        sub: profile.id.to_string(),
        first_name: profile.localized_first_name,
        last_name: profile.localized_last_name,
        picture: profile
            .profile_picture
            .filter(|picture| !picture.is_null())
            .map(|picture| picture.to_string()),
    }
}

/// Picks the primary email address.
///
/// LinkedIn marks one handle per type as primary; phone numbers are
/// skipped. LinkedIn only hands out confirmed addresses, so the result is
/// always verified.
pub fn normalize_emails(emails: RawEmailList) -> Result<EmailClaims, Error> {
    let email = emails
        .elements
        .into_iter()
        .find(|element| element.primary && element.kind.as_deref() == Some(EMAIL_HANDLE_TYPE))
        .and_then(|element| element.handle)
        .and_then(|handle| handle.email_address)
        .ok_or(Error::NoPrimaryEmail)?;

    Ok(EmailClaims {
        email,
        email_verified: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{MemberId, RawEmailElement, RawEmailHandle};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn element(primary: bool, kind: &str, email: Option<&str>) -> RawEmailElement {
        RawEmailElement {
            primary,
            kind: Some(kind.to_string()),
            handle: Some(RawEmailHandle {
                email_address: email.map(str::to_string),
            }),
        }
    }

    #[test]
    fn test_normalize_profile() {
        let picture = json!({ "displayImage": "urn:li:digitalmediaAsset:C4" });
        let profile = RawProfile {
            id: MemberId::Text("abc123".to_string()),
            localized_first_name: Some("Ann".to_string()),
            localized_last_name: Some("Lee".to_string()),
            profile_picture: Some(picture.clone()),
        };

        let got = normalize_profile(profile);

        assert_eq!(got.sub, "abc123");
        assert_eq!(got.first_name.as_deref(), Some("Ann"));
        assert_eq!(got.last_name.as_deref(), Some("Lee"));
        let got_picture: Value = serde_json::from_str(got.picture.as_deref().unwrap()).unwrap();
        assert_eq!(got_picture, picture);
    }

    #[test]
    fn test_normalize_profile_keeps_picture_field_order() {
        let profile: RawProfile = serde_json::from_str(
            r#"{"id":"abc","profilePicture":{"displayImage":"urn:x","displayImage~":{"paging":{"count":10},"elements":[]}}}"#,
        )
        .unwrap();

        let got = normalize_profile(profile);

        assert_eq!(
            got.picture.as_deref(),
            Some(r#"{"displayImage":"urn:x","displayImage~":{"paging":{"count":10},"elements":[]}}"#)
        );
    }

    #[test]
    fn test_normalize_profile_numeric_id() {
        let profile: RawProfile = serde_json::from_value(json!({ "id": 42 })).unwrap();

        let got = normalize_profile(profile);

        assert_eq!(got.sub, "42");
    }

    #[test]
    fn test_normalize_profile_omits_missing_fields() {
        let profile: RawProfile =
            serde_json::from_value(json!({ "id": "abc", "profilePicture": null })).unwrap();

        let got = serde_json::to_value(normalize_profile(profile)).unwrap();

        assert_eq!(got, json!({ "sub": "abc" }));
    }

    #[test]
    fn test_normalize_emails_picks_primary_email() {
        let emails = RawEmailList {
            elements: vec![
                element(false, "EMAIL", Some("old@example.com")),
                element(true, "PHONE", None),
                element(true, "EMAIL", Some("ann@example.com")),
                element(true, "EMAIL", Some("second@example.com")),
            ],
        };

        let got = normalize_emails(emails).unwrap();

        assert_eq!(
            got,
            EmailClaims {
                email: "ann@example.com".to_string(),
                email_verified: true,
            }
        );
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::no_primary(vec![element(false, "EMAIL", Some("ann@example.com"))])]
    #[case::primary_phone_only(vec![element(true, "PHONE", None)])]
    #[case::primary_without_address(vec![element(true, "EMAIL", None)])]
    fn test_normalize_emails_no_primary_email(#[case] elements: Vec<RawEmailElement>) {
        let got = normalize_emails(RawEmailList { elements });

        assert!(matches!(got, Err(Error::NoPrimaryEmail)));
    }

    #[test]
    fn test_user_info_serializes_flat() {
        let info = UserInfo::new(
            ProfileClaims {
                sub: "abc".to_string(),
                first_name: Some("Ann".to_string()),
                last_name: Some("Lee".to_string()),
                picture: Some("{}".to_string()),
            },
            EmailClaims {
                email: "ann@example.com".to_string(),
                email_verified: true,
            },
        );

        let got = serde_json::to_value(info).unwrap();

        assert_eq!(
            got,
            json!({
                "sub": "abc",
                "firstName": "Ann",
                "lastName": "Lee",
                "picture": "{}",
                "email": "ann@example.com",
                "email_verified": true
            })
        );
    }
}
