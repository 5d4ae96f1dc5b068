// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete data held in the dashboard session.

use serde::{Deserialize, Serialize};

use crate::models::{Activity, ActivityType, AthleteProfile, AthleteStats};

/// Everything fetched for the signed-in athlete.
///
/// Replaced wholesale on each successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub activities: Vec<Activity>,
    pub stats: AthleteStats,
    pub profile: AthleteProfile,
}

impl Athlete {
    /// Activities of the selected type, in fetch order.
    pub fn activities_of(&self, activity: ActivityType) -> Vec<Activity> {
        self.activities
            .iter()
            .filter(|a| a.activity_type == activity)
            .cloned()
            .collect()
    }
}
