// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-Goals: track a yearly distance goal against Strava activities
//!
//! This crate provides the dashboard backend: it signs the athlete in with
//! Strava, keeps their activities and year-to-date totals in memory, and
//! serves progress, pace and stats view-models.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod views;

use chrono::Utc;
use config::Config;
use db::LocalStore;
use models::Settings;
use services::session::{Session, SessionManager, SessionOutcome};
use services::strava::{StravaApi, StravaClient};
use tokio::sync::RwLock;

/// Shared application state.
///
/// `session` and `settings` are the dashboard's UI state. Both are replaced
/// as a whole on every change.
pub struct AppState<A = StravaClient> {
    pub config: Config,
    pub store: LocalStore,
    pub sessions: SessionManager<A>,
    pub session: RwLock<Option<Session>>,
    pub settings: RwLock<Settings>,
}

impl<A: StravaApi> AppState<A> {
    /// Build state, loading persisted settings (defaults if absent or malformed).
    pub async fn new(config: Config, api: A, store: LocalStore) -> Self {
        let settings = store.get_settings().await.unwrap_or_default();

        Self {
            config,
            sessions: SessionManager::new(api, store.clone()),
            store,
            session: RwLock::new(None),
            settings: RwLock::new(settings),
        }
    }

    /// Run the credential lifecycle (the equivalent of a page load).
    ///
    /// On success the session is replaced; otherwise it is left as it was.
    /// Returns whether a session is now present.
    pub async fn reload(&self, code: Option<&str>) -> bool {
        match self.sessions.bootstrap(code, Utc::now()).await {
            SessionOutcome::Authenticated { path, session } => {
                tracing::info!(
                    athlete_id = session.athlete.profile.id,
                    ?path,
                    "Session established"
                );
                *self.session.write().await = Some(session);
                true
            }
            SessionOutcome::Unauthenticated => self.session.read().await.is_some(),
        }
    }

    /// Forget the stored credential and drop the session.
    pub async fn sign_out(&self) -> error::Result<()> {
        self.store.delete_token().await?;
        *self.session.write().await = None;
        tracing::info!("Signed out");
        Ok(())
    }
}
