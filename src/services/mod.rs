// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod session;
pub mod stats;
pub mod strava;

pub use session::{AuthPath, Session, SessionManager, SessionOutcome};
pub use stats::{check_sign, get_stats, DerivedStats, Sign};
pub use strava::{StravaApi, StravaClient, TokenResponse};
