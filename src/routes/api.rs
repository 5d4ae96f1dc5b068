// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard API routes.

use crate::error::{AppError, Result};
use crate::models::{ActivityType, AthleteProfile, AthleteStats, Settings};
use crate::services::{get_stats, StravaApi};
use crate::time_utils::format_utc_rfc3339;
use crate::views::{Tab, TabView};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Largest accepted yearly goal (km).
const MAX_GOAL_KM: f64 = 1_000_000.0;

pub fn routes<A: StravaApi + 'static>() -> Router<Arc<AppState<A>>> {
    Router::new()
        .route("/", get(get_dashboard::<A>))
        .route("/api/dashboard", get(get_dashboard::<A>))
        .route("/api/athlete", get(get_athlete::<A>))
        .route("/api/reload", post(reload::<A>))
        .route(
            "/api/settings",
            get(get_settings::<A>).put(update_settings::<A>),
        )
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Deserialize)]
struct DashboardQuery {
    #[serde(default)]
    tab: Tab,
    /// Reveal level for the stats table (0/1 placeholders, 2+ numbers)
    #[serde(default = "default_view")]
    view: u8,
}

fn default_view() -> u8 {
    crate::views::table::VIEW_REVEALED
}

/// Dashboard response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub title: String,
    pub description: String,
    pub authenticated: bool,
    /// Strava consent URL, only while signed out
    pub sign_in_url: Option<String>,
    pub profile: Option<AthleteProfile>,
    pub activity: ActivityType,
    pub goal: Option<f64>,
    pub view: TabView,
    pub generated_at: String,
}

/// Render the selected tab from the current session and settings.
async fn get_dashboard<A: StravaApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Query(params): Query<DashboardQuery>,
) -> Json<DashboardResponse> {
    let now = Utc::now();
    let settings = state.settings.read().await.clone();
    let session = state.session.read().await;

    let (view, profile) = match session.as_ref() {
        Some(session) => {
            let athlete = &session.athlete;
            let year_activities: Vec<_> = athlete
                .activities_of(settings.activity)
                .into_iter()
                .filter(|a| a.start_date.year() == now.year())
                .collect();
            let stats = get_stats(
                settings.goal,
                Some(athlete.stats.year_to_date(settings.activity)),
                &year_activities,
                now,
            );
            (
                TabView::render(&stats, params.tab, params.view),
                Some(athlete.profile.clone()),
            )
        }
        None => {
            let stats = get_stats(settings.goal, None, &[], now);
            (TabView::render(&stats, params.tab, params.view), None)
        }
    };

    let authenticated = profile.is_some();

    Json(DashboardResponse {
        title: page_title(&state.config.meta_title, now),
        description: state.config.meta_description.clone(),
        authenticated,
        sign_in_url: (!authenticated).then(|| state.config.authorize_url()),
        profile,
        activity: settings.activity,
        goal: settings.goal,
        view,
        generated_at: format_utc_rfc3339(now),
    })
}

fn page_title(meta_title: &str, now: DateTime<Utc>) -> String {
    format!("{} — {}", meta_title, now.year())
}

// ─── Athlete ─────────────────────────────────────────────────

/// Profile panel: who is signed in and their rolling Strava totals.
#[derive(Serialize)]
pub struct AthleteResponse {
    pub profile: AthleteProfile,
    pub stats: AthleteStats,
    /// Activities fetched for the current year, all types
    pub activity_count: usize,
}

async fn get_athlete<A: StravaApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
) -> Result<Json<AthleteResponse>> {
    let session = state.session.read().await;
    let athlete = &session.as_ref().ok_or(AppError::Unauthorized)?.athlete;

    Ok(Json(AthleteResponse {
        profile: athlete.profile.clone(),
        stats: athlete.stats.clone(),
        activity_count: athlete.activities.len(),
    }))
}

// ─── Reload ──────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReloadResponse {
    pub authenticated: bool,
}

/// Re-run the credential lifecycle and refetch athlete data.
async fn reload<A: StravaApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
) -> Json<ReloadResponse> {
    let authenticated = state.reload(None).await;
    Json(ReloadResponse { authenticated })
}

// ─── Settings ────────────────────────────────────────────────

async fn get_settings<A: StravaApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
) -> Json<Settings> {
    Json(state.settings.read().await.clone())
}

/// Partial settings update. Omitted fields keep their current value;
/// `"goal": null` clears the goal.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateSettingsRequest {
    #[serde(default, deserialize_with = "present")]
    goal: Option<Option<f64>>,
    #[serde(default)]
    activity: Option<ActivityType>,
}

/// Tell an explicit `null` (`Some(None)`) apart from an omitted field (`None`).
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl UpdateSettingsRequest {
    fn validate(&self) -> Result<()> {
        if let Some(Some(goal)) = self.goal {
            if !goal.is_finite() || goal <= 0.0 || goal > MAX_GOAL_KM {
                return Err(AppError::BadRequest(format!(
                    "Goal must be between 0 and {} km",
                    MAX_GOAL_KM
                )));
            }
        }

        if self.activity == Some(ActivityType::Other) {
            return Err(AppError::BadRequest(
                "Activity must be one of Run, Ride, Swim".to_string(),
            ));
        }

        Ok(())
    }
}

async fn update_settings<A: StravaApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<Settings>> {
    request.validate()?;

    let mut settings = state.settings.write().await;
    let updated = Settings {
        goal: request.goal.unwrap_or(settings.goal),
        activity: request.activity.unwrap_or(settings.activity),
    };

    state.store.set_settings(&updated).await?;
    *settings = updated.clone();

    tracing::info!(goal = ?updated.goal, activity = %updated.activity, "Settings updated");
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_page_title_has_year() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap();
        assert_eq!(page_title("Goal Tracker", now), "Goal Tracker — 2026");
    }

    #[test]
    fn test_settings_validation() {
        let ok = UpdateSettingsRequest {
            goal: Some(Some(1500.0)),
            activity: Some(ActivityType::Ride),
        };
        assert!(ok.validate().is_ok());

        for goal in [0.0, -1.0, f64::INFINITY, 2_000_000.0] {
            let bad = UpdateSettingsRequest {
                goal: Some(Some(goal)),
                activity: None,
            };
            assert!(matches!(bad.validate(), Err(AppError::BadRequest(_))));
        }

        let other = UpdateSettingsRequest {
            goal: None,
            activity: Some(ActivityType::Other),
        };
        assert!(other.validate().is_err());

        let clear = UpdateSettingsRequest {
            goal: Some(None),
            activity: None,
        };
        assert!(clear.validate().is_ok());
    }

    #[test]
    fn test_goal_null_is_distinct_from_omitted() {
        let omitted: UpdateSettingsRequest = serde_json::from_str(r#"{"activity":"Ride"}"#).unwrap();
        assert_eq!(omitted.goal, None);

        let cleared: UpdateSettingsRequest = serde_json::from_str(r#"{"goal":null}"#).unwrap();
        assert_eq!(cleared.goal, Some(None));

        let set: UpdateSettingsRequest = serde_json::from_str(r#"{"goal":800}"#).unwrap();
        assert_eq!(set.goal, Some(Some(800.0)));
    }
}
