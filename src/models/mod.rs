// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod athlete;
pub mod settings;
pub mod stats;
pub mod user;

pub use activity::{Activity, ActivityType};
pub use athlete::Athlete;
pub use settings::Settings;
pub use stats::{ActivityTotals, AthleteStats};
pub use user::{AthleteProfile, Credential};
