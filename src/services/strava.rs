// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Authorization code and refresh token exchanges
//! - Athlete profile, year-to-date activities and rolling stats
//! - Rate limit and bad-token detection

use crate::error::AppError;
use crate::models::{Activity, Athlete, AthleteProfile, AthleteStats, Credential};
use crate::time_utils::start_of_year;
use chrono::Utc;
use serde::Deserialize;
use std::future::Future;

const STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
const STRAVA_TOKEN_URL: &str = "https://www.strava.com/oauth/token";

/// Largest page Strava allows for `/athlete/activities`.
const ACTIVITIES_PER_PAGE: u32 = 200;
/// Upper bound on pages fetched for one year (2000 activities).
const MAX_ACTIVITY_PAGES: u32 = 10;

/// The Strava calls the session flow depends on.
///
/// `StravaClient` is the real implementation; tests substitute a recording
/// fake to observe which exchanges a bootstrap performs.
pub trait StravaApi: Send + Sync {
    /// Exchange a one-time authorization code for a token set.
    fn exchange_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<TokenResponse, AppError>> + Send;

    /// Exchange a refresh token for a new token set.
    fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<TokenResponse, AppError>> + Send;

    /// Fetch profile, this year's activities and rolling stats.
    fn fetch_athlete(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Athlete, AppError>> + Send;
}

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: STRAVA_API_URL.to_string(),
            token_url: STRAVA_TOKEN_URL.to_string(),
            client_id,
            client_secret,
        }
    }

    /// Get authenticated athlete profile.
    pub async fn get_athlete(&self, access_token: &str) -> Result<AthleteProfile, AppError> {
        let url = format!("{}/athlete", self.base_url);
        self.get_json(&url, access_token, &[]).await
    }

    /// Get rolling totals for an athlete.
    pub async fn get_athlete_stats(
        &self,
        access_token: &str,
        athlete_id: u64,
    ) -> Result<AthleteStats, AppError> {
        let url = format!("{}/athletes/{}/stats", self.base_url, athlete_id);
        self.get_json(&url, access_token, &[]).await
    }

    /// List one page of activities started after `after` (Unix timestamp).
    pub async fn list_activities(
        &self,
        access_token: &str,
        after: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Activity>, AppError> {
        let url = format!("{}/athlete/activities", self.base_url);
        self.get_json(
            &url,
            access_token,
            &[
                ("after", after.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
        )
        .await
    }

    /// List every activity since `after`, following pages until a short one.
    pub async fn list_all_activities(
        &self,
        access_token: &str,
        after: i64,
    ) -> Result<Vec<Activity>, AppError> {
        let mut activities = Vec::new();

        for page in 1..=MAX_ACTIVITY_PAGES {
            let batch = self
                .list_activities(access_token, after, page, ACTIVITIES_PER_PAGE)
                .await?;
            let fetched = batch.len() as u32;
            activities.extend(batch);

            if fetched < ACTIVITIES_PER_PAGE {
                return Ok(activities);
            }
        }

        tracing::warn!(
            count = activities.len(),
            "Activity page limit reached, older activities not fetched"
        );
        Ok(activities)
    }

    async fn token_request(
        &self,
        grant: &[(&str, &str)],
        context: &str,
    ) -> Result<TokenResponse, AppError> {
        let mut form = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        form.extend_from_slice(grant);

        let response = self
            .http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("{} request failed: {}", context, e)))?;

        check_response_json(response).await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        check_response_json(response).await
    }
}

impl StravaApi for StravaClient {
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        self.token_request(
            &[("code", code), ("grant_type", "authorization_code")],
            "Token exchange",
        )
        .await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        self.token_request(
            &[
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ],
            "Token refresh",
        )
        .await
    }

    async fn fetch_athlete(&self, access_token: &str) -> Result<Athlete, AppError> {
        let profile = self.get_athlete(access_token).await?;
        let after = start_of_year(Utc::now()).timestamp();

        let (activities, stats) = tokio::try_join!(
            self.list_all_activities(access_token, after),
            self.get_athlete_stats(access_token, profile.id),
        )?;

        tracing::info!(
            athlete_id = profile.id,
            activities = activities.len(),
            "Athlete data fetched"
        );

        Ok(Athlete {
            activities,
            stats,
            profile,
        })
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Strava rate limit hit (429)");
            return Err(AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string()));
        }

        if status.as_u16() == 401 {
            return Err(AppError::StravaApi(
                AppError::STRAVA_TOKEN_ERROR.to_string(),
            ));
        }

        return Err(AppError::StravaApi(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
}

/// Token exchange response from Strava OAuth.
///
/// Every field is optional so that a partial answer is a failed exchange
/// rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Only present on the authorization code exchange.
    #[serde(default)]
    pub athlete: Option<AthleteProfile>,
}

impl TokenResponse {
    /// A usable credential, or `None` unless all three parts are present.
    pub fn into_credential(self) -> Option<Credential> {
        let access_token = self.access_token.filter(|t| !t.is_empty())?;
        let refresh_token = self.refresh_token.filter(|t| !t.is_empty())?;
        let expires_at = self.expires_at.filter(|ts| *ts > 0)?;

        Some(Credential {
            access_token,
            refresh_token,
            expires_at: Some(expires_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_complete() {
        let response: TokenResponse = serde_json::from_str(
            r#"{
                "token_type": "Bearer",
                "access_token": "abc",
                "refresh_token": "def",
                "expires_at": 1900000000,
                "expires_in": 21600,
                "athlete": {"id": 42, "firstname": "Ada", "lastname": "L"}
            }"#,
        )
        .unwrap();

        assert_eq!(response.athlete.as_ref().map(|a| a.id), Some(42));

        let credential = response.into_credential().unwrap();
        assert_eq!(credential.access_token, "abc");
        assert_eq!(credential.refresh_token, "def");
        assert_eq!(credential.expires_at, Some(1_900_000_000));
    }

    #[test]
    fn test_token_response_incomplete() {
        let missing_refresh: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","expires_at":1900000000}"#).unwrap();
        assert!(missing_refresh.into_credential().is_none());

        let empty_access: TokenResponse = serde_json::from_str(
            r#"{"access_token":"","refresh_token":"def","expires_at":1900000000}"#,
        )
        .unwrap();
        assert!(empty_access.into_credential().is_none());

        let error_body: TokenResponse = serde_json::from_str(
            r#"{"message":"Bad Request","errors":[{"resource":"AuthorizationCode","code":"invalid"}]}"#,
        )
        .unwrap();
        assert!(error_body.into_credential().is_none());
    }
}
