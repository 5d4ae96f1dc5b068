// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use strava_goals::config::Config;
use strava_goals::db::LocalStore;
use strava_goals::error::AppError;
use strava_goals::models::{
    Activity, ActivityTotals, ActivityType, Athlete, AthleteProfile, AthleteStats, Credential,
};
use strava_goals::routes::create_router;
use strava_goals::services::{StravaApi, TokenResponse};
use strava_goals::AppState;

/// Expiry far enough out that tokens issued by the fake are always valid.
pub const FAR_FUTURE: i64 = 4_000_000_000;

/// In-process stand-in for Strava that records every call.
#[derive(Default)]
pub struct FakeStrava {
    pub authorize_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub fail_authorize: AtomicBool,
    pub fail_refresh: AtomicBool,
    /// With `fail_refresh`, answer 429 instead of a rejected token.
    pub refresh_rate_limited: AtomicBool,
    pub fail_fetch: AtomicBool,
    /// Refresh tokens presented to `refresh_token`, in order.
    pub refreshed_with: Mutex<Vec<String>>,
    /// Athlete returned by `fetch_athlete`.
    pub athlete: Mutex<Athlete>,
}

#[allow(dead_code)]
impl FakeStrava {
    pub fn authorize_count(&self) -> usize {
        self.authorize_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn exchange_count(&self) -> usize {
        self.authorize_count() + self.refresh_count()
    }

    pub fn set_athlete(&self, athlete: Athlete) {
        *self.athlete.lock().unwrap() = athlete;
    }
}

fn issued(prefix: &str) -> TokenResponse {
    TokenResponse {
        access_token: Some(format!("{}-access", prefix)),
        refresh_token: Some(format!("{}-refresh", prefix)),
        expires_at: Some(FAR_FUTURE),
        athlete: Some(AthleteProfile {
            id: 42,
            firstname: "Ada".to_string(),
            ..Default::default()
        }),
    }
}

impl StravaApi for FakeStrava {
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        self.authorize_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_authorize.load(Ordering::SeqCst) {
            return Err(AppError::StravaApi(format!("bad code {}", code)));
        }
        Ok(issued("authorized"))
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refreshed_with
            .lock()
            .unwrap()
            .push(refresh_token.to_string());
        if self.fail_refresh.load(Ordering::SeqCst) {
            let message = if self.refresh_rate_limited.load(Ordering::SeqCst) {
                AppError::STRAVA_RATE_LIMIT
            } else {
                AppError::STRAVA_TOKEN_ERROR
            };
            return Err(AppError::StravaApi(message.to_string()));
        }
        Ok(issued("refreshed"))
    }

    async fn fetch_athlete(&self, _access_token: &str) -> Result<Athlete, AppError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string()));
        }
        Ok(self.athlete.lock().unwrap().clone())
    }
}

/// A credential that expires at `expires_at` (Unix seconds).
#[allow(dead_code)]
pub fn credential(expires_at: Option<i64>) -> Credential {
    Credential {
        access_token: "stored-access".to_string(),
        refresh_token: "stored-refresh".to_string(),
        expires_at,
    }
}

/// A single activity of `km` kilometers.
#[allow(dead_code)]
pub fn activity(id: u64, activity_type: ActivityType, start_date: DateTime<Utc>, km: f64) -> Activity {
    Activity {
        id,
        name: format!("Activity {}", id),
        activity_type,
        start_date,
        distance: km * 1000.0,
        moving_time: 3600,
        elapsed_time: 3700,
        total_elevation_gain: 50.0,
    }
}

/// An athlete whose year-to-date run total is `ytd_run_km`.
#[allow(dead_code)]
pub fn athlete(ytd_run_km: f64, activities: Vec<Activity>) -> Athlete {
    Athlete {
        activities,
        stats: AthleteStats {
            ytd_run_totals: ActivityTotals {
                count: 25,
                distance: ytd_run_km * 1000.0,
                ..Default::default()
            },
            ..Default::default()
        },
        profile: AthleteProfile {
            id: 42,
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            ..Default::default()
        },
    }
}

/// Create a test app backed by an in-memory store and a fake Strava.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState<FakeStrava>>) {
    create_test_app_with_store(LocalStore::new_mock()).await
}

/// Same as [`create_test_app`] but over a caller-prepared store.
#[allow(dead_code)]
pub async fn create_test_app_with_store(
    store: LocalStore,
) -> (axum::Router, Arc<AppState<FakeStrava>>) {
    let config = Config::test_default();
    let state = Arc::new(AppState::new(config, FakeStrava::default(), store).await);

    (create_router(state.clone()), state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
