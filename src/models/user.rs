// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete credential and profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// OAuth token set persisted under the `token` storage record.
///
/// Field names match the stored JSON (`accessToken`, `refreshToken`,
/// `expiresAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub access_token: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub refresh_token: String,
    /// Access token expiry (Unix seconds). Absent means "treat as expired".
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl Credential {
    /// A stored record only counts as a credential if it carries an access token.
    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// The access token is usable only while `now < expires_at`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
            Some(expires_at) => now < expires_at,
            None => false,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Athlete profile fields shown in the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AthleteProfile {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    /// Avatar URL (Strava `profile`)
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_validity_window() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let credential = Credential {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: Some(1_700_000_001),
        };
        assert!(credential.is_valid_at(now));

        let expired = Credential {
            expires_at: Some(1_700_000_000),
            ..credential.clone()
        };
        assert!(!expired.is_valid_at(now));

        let no_expiry = Credential {
            expires_at: None,
            ..credential
        };
        assert!(!no_expiry.is_valid_at(now));
    }

    #[test]
    fn test_credential_stored_field_names() {
        let json = r#"{"accessToken":"a","refreshToken":"r","expiresAt":42}"#;
        let credential: Credential = serde_json::from_str(json).unwrap();
        assert_eq!(credential.access_token, "a");
        assert_eq!(credential.refresh_token, "r");
        assert_eq!(credential.expires_at, Some(42));

        let empty: Credential =
            serde_json::from_str(r#"{"accessToken":null,"refreshToken":null,"expiresAt":null}"#)
                .unwrap();
        assert!(!empty.has_access_token());
        assert_eq!(empty.expires_at, None);
    }
}
