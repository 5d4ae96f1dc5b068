// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::services::StravaApi;
use crate::AppState;

pub fn routes<A: StravaApi + 'static>() -> Router<Arc<AppState<A>>> {
    Router::new()
        .route("/auth/strava", get(auth_start::<A>))
        .route("/auth/strava/callback", get(auth_callback::<A>))
        .route("/auth/logout", get(logout::<A>))
}

/// Start OAuth flow - redirect to Strava authorization.
async fn auth_start<A: StravaApi + 'static>(State(state): State<Arc<AppState<A>>>) -> Redirect {
    tracing::info!(
        client_id = %state.config.strava_client_id,
        "Starting OAuth flow, redirecting to Strava"
    );

    Redirect::temporary(&state.config.authorize_url())
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - run the credential lifecycle with the returned code.
///
/// Always lands back on the dashboard; a failed exchange simply leaves it
/// signed out.
async fn auth_callback<A: StravaApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let frontend_url = &state.config.frontend_url;

    // Check for OAuth errors (e.g. the athlete pressed "Cancel")
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Strava");
        let redirect = format!("{}?error={}", frontend_url, urlencoding::encode(&error));
        return Redirect::temporary(&redirect);
    }

    let authenticated = state.reload(params.code.as_deref()).await;
    tracing::info!(authenticated, "OAuth callback handled");

    Redirect::temporary(frontend_url)
}

/// Logout - forget the stored credential.
async fn logout<A: StravaApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
) -> Result<Redirect> {
    state.sign_out().await?;
    Ok(Redirect::temporary(&state.config.frontend_url))
}
