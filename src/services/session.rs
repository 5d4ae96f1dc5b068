// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential lifecycle: decide how to obtain a usable access token on load.
//!
//! Decision order (first match wins):
//! 1. Stored credential with an access token: use it while unexpired,
//!    otherwise exchange its refresh token.
//! 2. Authorization code present: exchange it for a token set.
//! 3. Neither: stay signed out.
//!
//! Exchange and fetch failures are logged and end the flow signed out.
//! Nothing is retried.

use crate::db::LocalStore;
use crate::models::{Athlete, Credential};
use crate::services::strava::StravaApi;
use crate::time_utils::format_unix_rfc3339;
use chrono::{DateTime, Utc};

/// Signed-in dashboard state: the credential in use and the athlete data
/// fetched with it. Replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub credential: Credential,
    pub athlete: Athlete,
}

/// Which branch produced the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPath {
    /// Stored credential was still valid; no exchange made.
    Stored,
    /// Stored credential had expired and was refreshed.
    Refreshed,
    /// Authorization code was exchanged.
    Authorized,
}

/// Result of running the credential lifecycle once.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Authenticated { path: AuthPath, session: Session },
    Unauthenticated,
}

impl SessionOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionOutcome::Authenticated { .. })
    }
}

/// Runs the credential lifecycle against a Strava API and the local store.
#[derive(Clone)]
pub struct SessionManager<A> {
    api: A,
    store: LocalStore,
}

impl<A: StravaApi> SessionManager<A> {
    pub fn new(api: A, store: LocalStore) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Obtain a credential and fetch athlete data.
    ///
    /// `code` is the authorization code from the OAuth redirect, if any.
    /// It is only consulted when no stored credential exists.
    pub async fn bootstrap(&self, code: Option<&str>, now: DateTime<Utc>) -> SessionOutcome {
        let stored = self
            .store
            .get_token()
            .await
            .filter(Credential::has_access_token);

        let (path, credential) = if let Some(stored) = stored {
            if stored.is_valid_at(now) {
                tracing::debug!("Stored access token still valid");
                (AuthPath::Stored, stored)
            } else {
                tracing::info!(
                    expired_at = ?stored.expires_at.and_then(format_unix_rfc3339),
                    "Stored access token expired, refreshing"
                );
                match self.refresh(&stored).await {
                    Some(credential) => (AuthPath::Refreshed, credential),
                    None => return SessionOutcome::Unauthenticated,
                }
            }
        } else if let Some(code) = code.filter(|c| !c.is_empty()) {
            tracing::info!("Exchanging authorization code for tokens");
            match self.authorize(code).await {
                Some(credential) => (AuthPath::Authorized, credential),
                None => return SessionOutcome::Unauthenticated,
            }
        } else {
            tracing::debug!("No stored credential and no authorization code");
            return SessionOutcome::Unauthenticated;
        };

        match self.api.fetch_athlete(&credential.access_token).await {
            Ok(athlete) => SessionOutcome::Authenticated {
                path,
                session: Session {
                    credential,
                    athlete,
                },
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch athlete data");
                SessionOutcome::Unauthenticated
            }
        }
    }

    async fn refresh(&self, stored: &Credential) -> Option<Credential> {
        let response = match self.api.refresh_token(&stored.refresh_token).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    token_rejected = e.is_strava_token_error(),
                    "Token refresh failed"
                );
                return None;
            }
        };

        let Some(credential) = response.into_credential() else {
            tracing::warn!("Token refresh returned an incomplete token set");
            return None;
        };

        self.persist(&credential).await;
        Some(credential)
    }

    async fn authorize(&self, code: &str) -> Option<Credential> {
        let response = match self.api.exchange_code(code).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Authorization code exchange failed");
                return None;
            }
        };

        let athlete_id = response.athlete.as_ref().map(|a| a.id);
        let Some(credential) = response.into_credential() else {
            tracing::warn!("Authorization code exchange returned an incomplete token set");
            return None;
        };

        tracing::info!(athlete_id, "Authorization code exchanged");
        self.persist(&credential).await;
        Some(credential)
    }

    /// A credential that cannot be written is still used for this session.
    async fn persist(&self, credential: &Credential) {
        if let Err(e) = self.store.set_token(credential).await {
            tracing::warn!(error = %e, "Failed to persist credential, continuing anyway");
        }
    }
}
