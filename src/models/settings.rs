// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User preferences persisted under the `settings` storage record.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::ActivityType;

/// Default yearly goal in kilometers.
pub const DEFAULT_GOAL_KM: f64 = 1000.0;

fn default_goal() -> Option<f64> {
    Some(DEFAULT_GOAL_KM)
}

/// Dashboard preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Settings {
    /// Yearly distance goal (km). `None` disables goal-relative figures.
    #[serde(default = "default_goal")]
    pub goal: Option<f64>,
    /// Activity type the views are filtered to.
    #[serde(default)]
    pub activity: ActivityType,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            goal: default_goal(),
            activity: ActivityType::Run,
        }
    }
}
